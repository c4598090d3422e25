//! HTTP handlers for users, projects and tasks.
//!
//! CRUD endpoints report unexpected store failures as `400`; search endpoints
//! (including `/{id}/tasks`) report them as `500`.

mod projects;
mod tasks;
mod users;

use axum::Router;
use axum_helpers::AppError;
use std::sync::Arc;

use crate::service::ManagementService;

type SharedService = Arc<ManagementService>;

/// Create the management router, to be nested under the API version prefix
pub fn router(service: ManagementService) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .nest("/users", users::router())
        .nest("/projects", projects::router())
        .nest("/tasks", tasks::router())
        .with_state(shared_service)
}

/// Error mapping for CRUD endpoints.
fn crud_error<E: Into<AppError>>(err: E) -> AppError {
    match err.into() {
        AppError::InternalServerError(msg) => AppError::BadRequest(msg),
        other => other,
    }
}
