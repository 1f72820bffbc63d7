//! Direct-navigation endpoint

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

use crate::resolve::Route;
use crate::service::{
    server::AppState,
    types::{ErrorResponse, NavigateParams, NavigateResponse, ServiceError},
    validation::validate_query,
};

/// Resolve a path segment to a single view.
///
/// `200` for a dispatched route, `300` with the candidate list when an
/// external id matched several variants, and `404` when it matched none or
/// the segment has no navigable shape.
pub async fn navigate(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<NavigateParams>,
) -> Result<(StatusCode, Json<NavigateResponse>), (StatusCode, Json<ErrorResponse>)> {
    if let Err(validation_error) = validate_query(&segment) {
        return Err(ServiceError::BadRequest(validation_error.to_string()).into_rejection());
    }
    let ctx = state
        .dataset(params.dataset.as_deref())
        .map_err(ServiceError::into_rejection)?;

    let route = state
        .resolver
        .navigate(&segment, &ctx)
        .await
        .map_err(|e| ServiceError::from(e).into_rejection())?;

    let status = match &route {
        Route::Variant { .. } | Route::StructuralVariant { .. } => StatusCode::OK,
        Route::Ambiguous { .. } => StatusCode::MULTIPLE_CHOICES,
        Route::NotFound { .. } => StatusCode::NOT_FOUND,
    };

    Ok((
        status,
        Json(NavigateResponse {
            segment,
            dataset: ctx.id,
            code: route.code().map(|code| code.as_str()),
            route,
        }),
    ))
}
