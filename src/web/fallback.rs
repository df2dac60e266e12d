use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// Fallback for unknown routes.
///
/// Answers `404 Not Found` with the same `{"error": ...}` body shape the
/// upload endpoint uses for its failures.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

/// Liveness probe.
pub async fn healthz() -> &'static str {
    "ok"
}
