//! Success, directory and non-JSON endpoint handlers.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse},
    Json,
};

use crate::mock_server::state::SharedState;
use crate::models::ApiResult;

const INDEX_HTML: &str = "<!doctype html>
<html>
  <head><title>reqstate mock API</title></head>
  <body><p>Mock problem-details API. The route directory is at <a href=\"/api\">/api</a>.</p></body>
</html>
";

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /api
pub async fn route_directory(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    match serde_json::to_value(&state.routes) {
        Ok(routes) => (StatusCode::OK, Json(ApiResult::success(Some(routes)))).into_response(),
        Err(err) => {
            tracing::error!(%err, "could not serialize route directory");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// GET /api/success-empty
pub async fn success_empty() -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResult::success(None)))
}

/// GET /api/success-data
pub async fn success_data(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let data = state
        .developer()
        .and_then(|d| serde_json::to_value(d).ok());
    (StatusCode::OK, Json(ApiResult::success(data)))
}

/// GET /api/non-json-result
pub async fn non_json_result() -> impl IntoResponse {
    (StatusCode::OK, "This is not JSON, it is plain text")
}

/// Fallback for unrouted paths: a plain-text 404.
pub async fn not_routed(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::debug!(%method, %uri, "no route");
    (StatusCode::NOT_FOUND, format!("Cannot {method} {}", uri.path()))
}
