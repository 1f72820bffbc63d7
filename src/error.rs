//! Error types for ferro-resolve
//!
//! Resolution has very few real failure points: the grammar and normalizer are
//! total over their own matches, and "nothing matched" is an empty candidate
//! list rather than an error. What remains is:
//! - the remote search collaborators being unreachable or returning garbage
//! - a direct-navigation path segment that has no recognizable shape
//! - configuration and IO problems in the binaries

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Grammar errors (E1xxx)
    /// Text does not have the shape of the requested identifier kind
    InvalidIdentifier = 1001,

    // Remote search errors (E2xxx)
    /// Search service failed or returned a malformed payload
    SearchUnavailable = 2001,

    // Navigation errors (E3xxx)
    /// Direct-navigation segment matched no navigable shape
    InvalidDirectIdentifier = 3001,
    /// Direct navigation resolved to more than one destination; reported
    /// alongside a disambiguation list rather than as a failure
    AmbiguousDirectNavigation = 3002,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// Configuration error
    ConfigError = 9002,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E2001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidIdentifier => "invalid identifier",
            ErrorCode::SearchUnavailable => "search service unavailable",
            ErrorCode::InvalidDirectIdentifier => "invalid direct-navigation identifier",
            ErrorCode::AmbiguousDirectNavigation => "ambiguous direct navigation",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for ferro-resolve operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// Text was parsed as a specific identifier kind but does not have its shape
    #[error("Invalid {kind} identifier: {input}")]
    InvalidIdentifier { kind: String, input: String },

    /// The remote search call failed at the transport level or returned an
    /// unexpected payload. Distinct from an empty result.
    #[error("Search unavailable: {reason}")]
    SearchUnavailable { reason: String },

    /// A direct-navigation path segment matched no variant, structural variant,
    /// rsID, CAID, or ClinVar shape
    #[error("Invalid identifier for direct navigation: {input}")]
    InvalidDirectIdentifier { input: String },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {msg}")]
    Config { msg: String },

    /// IO error
    #[error("IO error: {msg}")]
    Io { msg: String },
}

impl ResolveError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolveError::InvalidIdentifier { .. } => ErrorCode::InvalidIdentifier,
            ResolveError::SearchUnavailable { .. } => ErrorCode::SearchUnavailable,
            ResolveError::InvalidDirectIdentifier { .. } => ErrorCode::InvalidDirectIdentifier,
            ResolveError::Config { .. } => ErrorCode::ConfigError,
            ResolveError::Io { .. } => ErrorCode::IoError,
        }
    }

    /// Shorthand for a search failure.
    pub fn search_unavailable(reason: impl Into<String>) -> Self {
        ResolveError::SearchUnavailable {
            reason: reason.into(),
        }
    }

    /// Format the error with its code prefix, e.g. `[E2001] Search unavailable: ...`.
    pub fn detailed_message(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }
}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        ResolveError::Io {
            msg: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ResolveError {
    fn from(err: toml::de::Error) -> Self {
        ResolveError::Config {
            msg: err.to_string(),
        }
    }
}
