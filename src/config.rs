//! Configuration file support for ferro-resolve.
//!
//! # Example Configuration
//!
//! ```toml
//! [resolver]
//! window_radius = 20
//! default_dataset = "gnomad_r4"
//!
//! [remote]
//! endpoint = "https://gnomad.broadinstitute.org/api"
//! timeout_seconds = 30
//! # min_interval_ms = 250
//!
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! ```
//!
//! # Config File Locations
//!
//! Configuration is searched in this order (first found wins):
//! 1. `.ferro-resolve.toml` in current directory
//! 2. `~/.config/ferro/resolve.toml`
//!
//! CLI flags take precedence over config file settings.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ResolveError;
use crate::resolve::DEFAULT_WINDOW_RADIUS;

/// Default GraphQL endpoint of the browser API.
pub const DEFAULT_ENDPOINT: &str = "https://gnomad.broadinstitute.org/api";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub resolver: ResolverSettings,
    pub remote: RemoteConfig,
    pub server: ServerConfig,
}

/// Local resolution settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Half-width of the window opened around a bare position (default: 20)
    pub window_radius: u64,
    /// Dataset used when a caller does not name one (default: "gnomad_r4")
    pub default_dataset: String,
}

/// Remote search API settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// GraphQL endpoint
    pub endpoint: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_seconds: u64,
    /// Minimum spacing between requests in milliseconds (default: disabled)
    pub min_interval_ms: Option<u64>,
}

/// Web service settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,
    /// Port to listen on (default: 3000)
    pub port: u16,
    /// Directory of Markdown help topics
    pub help_dir: Option<PathBuf>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            window_radius: DEFAULT_WINDOW_RADIUS,
            default_dataset: "gnomad_r4".to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 30,
            min_interval_ms: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            help_dir: None,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from the default locations.
    ///
    /// Returns `None` when no config file exists. A file that exists but
    /// fails to parse is logged and skipped.
    pub fn load() -> Option<Self> {
        let mut candidates = vec![PathBuf::from(".ferro-resolve.toml")];
        if let Some(home) = dirs_home() {
            candidates.push(home.join(".config").join("ferro").join("resolve.toml"));
        }

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_path(path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    return Some(config);
                }
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "ignoring config"),
            }
        }
        None
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ResolveError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML content.
    pub fn parse(content: &str) -> Result<Self, ResolveError> {
        let config: ResolverConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file(&self, path: &Path) -> Result<(), ResolveError> {
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ResolveError> {
        toml::to_string_pretty(self).map_err(|e| ResolveError::Config { msg: e.to_string() })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ResolveError> {
        let invalid = |msg: &str| {
            Err(ResolveError::Config {
                msg: msg.to_string(),
            })
        };

        if self.server.port == 0 {
            return invalid("Server port must be greater than 0");
        }
        if self.remote.endpoint.trim().is_empty() {
            return invalid("Remote endpoint must not be empty");
        }
        if self.remote.timeout_seconds == 0 {
            return invalid("Remote timeout must be greater than 0");
        }
        if self.resolver.default_dataset.trim().is_empty() {
            return invalid("Default dataset must not be empty");
        }
        Ok(())
    }
}

/// Get the user's home directory.
fn dirs_home() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
