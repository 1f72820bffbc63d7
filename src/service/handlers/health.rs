//! Health check endpoint

use axum::response::Json;

use crate::service::types::HealthResponse;

/// Liveness check. Does not touch the remote search service.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
