//! Help-topic search endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};

use crate::service::{
    server::AppState,
    types::{ErrorResponse, HelpParams, HelpResponse, ServiceError},
    validation::{validate_query, MAX_HELP_LIMIT},
};

const DEFAULT_HELP_LIMIT: usize = 10;

pub async fn help(
    State(state): State<AppState>,
    Query(params): Query<HelpParams>,
) -> Result<Json<HelpResponse>, (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_error) = validate_query(&params.q) {
        return Err(ServiceError::BadRequest(validation_error.to_string()).into_rejection());
    }
    let limit = params
        .limit
        .unwrap_or(DEFAULT_HELP_LIMIT)
        .clamp(1, MAX_HELP_LIMIT);

    let hits = state.help.search(&params.q, limit);
    Ok(Json(HelpResponse {
        query: params.q,
        hits,
    }))
}
