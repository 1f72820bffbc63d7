//! Request and response types for the web service

use axum::{http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::help::HelpHit;
use crate::resolve::{NavigationCandidate, Route};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Query string for `/api/search`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub dataset: Option<String>,
}

/// Query string for `/api/navigate/:segment`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavigateParams {
    pub dataset: Option<String>,
}

/// Query string for `/api/help`
#[derive(Debug, Clone, Deserialize)]
pub struct HelpParams {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

/// Search mode result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub dataset: String,
    pub candidates: Vec<NavigationCandidate>,
}

/// Direct navigation result
#[derive(Debug, Clone, Serialize)]
pub struct NavigateResponse {
    pub segment: String,
    pub dataset: String,
    /// `E3002` when the route is a disambiguation list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub route: Route,
}

/// Help search result
#[derive(Debug, Clone, Serialize)]
pub struct HelpResponse {
    pub query: String,
    pub hits: Vec<HelpHit>,
}

/// Standard error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type
    pub error: String,
    /// Error code such as `E2001`, for resolution failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable error message
    pub message: String,
}

/// Service error types
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl ServiceError {
    /// Convert to HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Resolve(e) => match e {
                ResolveError::InvalidIdentifier { .. } => 400,
                ResolveError::InvalidDirectIdentifier { .. } => 404,
                ResolveError::SearchUnavailable { .. } => 503,
                ResolveError::Config { .. } | ResolveError::Io { .. } => 500,
            },
        }
    }

    /// Convert to error response
    pub fn to_response(&self) -> ErrorResponse {
        let (error, code) = match self {
            ServiceError::BadRequest(_) => ("bad_request", None),
            ServiceError::Resolve(e) => {
                let kind = match e {
                    ResolveError::InvalidIdentifier { .. } => "invalid_identifier",
                    ResolveError::InvalidDirectIdentifier { .. } => "invalid_direct_identifier",
                    ResolveError::SearchUnavailable { .. } => "search_unavailable",
                    ResolveError::Config { .. } => "config_error",
                    ResolveError::Io { .. } => "io_error",
                };
                (kind, Some(e.code().as_str()))
            }
        };
        ErrorResponse {
            error: error.to_string(),
            code,
            message: self.to_string(),
        }
    }

    /// Status and body for a handler's `Err` arm.
    pub fn into_rejection(self) -> (StatusCode, Json<ErrorResponse>) {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response()))
    }
}
