//! Search-mode endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};

use crate::service::{
    server::AppState,
    types::{ErrorResponse, SearchParams, SearchResponse, ServiceError},
    validation::validate_query,
};

/// Resolve a free-text query to candidates.
///
/// An empty candidate list is a normal `200`; a failed gene search is `503`.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_error) = validate_query(&params.q) {
        return Err(ServiceError::BadRequest(validation_error.to_string()).into_rejection());
    }
    let ctx = state
        .dataset(params.dataset.as_deref())
        .map_err(ServiceError::into_rejection)?;

    match state.resolver.search(&params.q, &ctx).await {
        Ok(candidates) => Ok(Json(SearchResponse {
            query: params.q,
            dataset: ctx.id,
            candidates,
        })),
        Err(e) => {
            tracing::warn!(query = %params.q, error = %e, "search failed");
            Err(ServiceError::from(e).into_rejection())
        }
    }
}
