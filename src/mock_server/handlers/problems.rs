//! Error endpoint handlers.
//!
//! Each route answers with a fixed status and a problem-details body whose
//! `type` URI is built from the request's `Host`.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::RequestOrigin;
use crate::mock_server::state::SharedState;
use crate::models::{ApiResult, FieldError, FIELDS_CONFLICT, FIELDS_INVALID};

fn problem(status: StatusCode, body: ApiResult) -> impl IntoResponse {
    (status, Json(body))
}

/// Attach the served developer record as `data`, when there is one.
async fn with_developer(state: &SharedState, body: ApiResult) -> ApiResult {
    let state = state.read().await;
    match state.developer() {
        Some(developer) => match serde_json::to_value(developer) {
            Ok(data) => body.with_data(data),
            Err(err) => {
                tracing::warn!(%err, "could not serialize developer fixture");
                body
            }
        },
        None => body,
    }
}

/// GET /api/badrequest
pub async fn badrequest(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    problem(
        StatusCode::BAD_REQUEST,
        ApiResult::problem(&origin, "Generic bad request"),
    )
}

/// GET /api/fields-invalid
pub async fn fields_invalid(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    let body = ApiResult::problem(&origin, FIELDS_INVALID)
        .with_title("Failed to update profile")
        .with_detail("Fields did not validate")
        .with_errors(vec![
            FieldError::new("age", "must be a positive integer"),
            FieldError::new("color", "must be 'green', 'red' or 'blue'"),
        ]);
    problem(StatusCode::BAD_REQUEST, body)
}

/// GET /api/fields-conflict
pub async fn fields_conflict(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    let body = ApiResult::problem(&origin, FIELDS_CONFLICT)
        .with_title("Failed to update profile")
        .with_detail("Conflicting values")
        .with_errors(vec![
            FieldError::new("gender", "Value is 'other'"),
            FieldError::new("league", "Value is 'womens'"),
        ]);
    problem(StatusCode::CONFLICT, body)
}

/// GET /api/forbidden-empty
pub async fn forbidden_empty(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    problem(StatusCode::FORBIDDEN, ApiResult::problem(&origin, "Forbidden"))
}

/// GET /api/forbidden-data
pub async fn forbidden_data(
    State(state): State<SharedState>,
    RequestOrigin(origin): RequestOrigin,
) -> impl IntoResponse {
    let body = with_developer(&state, ApiResult::problem(&origin, "Forbidden")).await;
    problem(StatusCode::FORBIDDEN, body)
}

/// GET /api/not-found-empty
pub async fn not_found_empty(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    problem(StatusCode::NOT_FOUND, ApiResult::problem(&origin, "Not found"))
}

/// GET /api/not-found-data
pub async fn not_found_data(
    State(state): State<SharedState>,
    RequestOrigin(origin): RequestOrigin,
) -> impl IntoResponse {
    let body = with_developer(&state, ApiResult::problem(&origin, "Not found")).await;
    problem(StatusCode::NOT_FOUND, body)
}

/// GET /api/division-by-zero
pub async fn division_by_zero(RequestOrigin(origin): RequestOrigin) -> impl IntoResponse {
    problem(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiResult::problem(&origin, "Division by zero"),
    )
}
