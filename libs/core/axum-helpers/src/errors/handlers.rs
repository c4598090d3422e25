use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Fallback handler for routes that do not exist.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 page not found").into_response()
}
