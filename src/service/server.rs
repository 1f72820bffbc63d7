//! Web server setup using Axum framework

use axum::{http::StatusCode, response::Json, routing::get, Router};
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::dataset::DatasetContext;
use crate::help::HelpIndex;
use crate::resolve::Resolver;
use crate::service::{
    handlers,
    types::{ErrorResponse, ServiceError},
    validation::validate_dataset,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolver used by search and navigation
    pub resolver: Arc<Resolver>,
    /// Help-topic index, built once at startup
    pub help: Arc<HelpIndex>,
    /// Service configuration
    pub config: Arc<ResolverConfig>,
}

impl AppState {
    pub fn new(resolver: Resolver, help: HelpIndex, config: ResolverConfig) -> Self {
        Self {
            resolver: Arc::new(resolver),
            help: Arc::new(help),
            config: Arc::new(config),
        }
    }

    /// Dataset context for a request, falling back to the configured default.
    pub fn dataset(&self, requested: Option<&str>) -> Result<DatasetContext, ServiceError> {
        match requested {
            Some(id) => {
                validate_dataset(id).map_err(|e| ServiceError::BadRequest(e.to_string()))?;
                Ok(DatasetContext::new(id))
            }
            None => Ok(DatasetContext::new(
                self.config.resolver.default_dataset.as_str(),
            )),
        }
    }
}

/// Create the Axum application from configuration.
pub fn create_app(config: ResolverConfig) -> Result<(Router, AppState), ServiceError> {
    let resolver = Resolver::from_config(&config)?;

    let help = match &config.server.help_dir {
        Some(dir) if dir.is_dir() => HelpIndex::from_dir(dir)?,
        Some(dir) => {
            tracing::warn!("Help directory {} does not exist. Help search will be empty.", dir.display());
            HelpIndex::default()
        }
        None => {
            tracing::debug!("No help directory configured. Help search will be empty.");
            HelpIndex::default()
        }
    };

    let state = AppState::new(resolver, help, config);
    Ok((router(state.clone()), state))
}

/// Build the router over an existing state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/search", get(handlers::search::search))
        .route("/api/navigate/:segment", get(handlers::navigate::navigate))
        .route("/api/help", get(handlers::help::help))
        .fallback(handle_404)
        .with_state(state)
}

/// Handle 404 errors
async fn handle_404() -> (StatusCode, Json<ErrorResponse>) {
    let error = ServiceError::BadRequest("Endpoint not found".to_string());
    (StatusCode::NOT_FOUND, Json(error.to_response()))
}
