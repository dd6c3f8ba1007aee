use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::jsearch::SearchParams;
use crate::state::AppState;

/// GET /api/job-search
///
/// Forwards the search to JSearch and returns its JSON body verbatim,
/// under the status code the provider answered with.
pub async fn handle_job_search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| AppError::Validation(e.body_text()))?;
    if params.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let upstream = state.jsearch.search(&params).await?;
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response())
}
