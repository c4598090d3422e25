use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError, field_errors};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    NotFound(String),

    #[error("task already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Search(String),

    #[error("invalid task input")]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl TaskError {
    pub fn not_found(id: &str) -> Self {
        TaskError::NotFound(format!("task {} not found", id))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, TaskError::Internal(_))
    }
}

impl From<ValidationErrors> for TaskError {
    fn from(errors: ValidationErrors) -> Self {
        TaskError::Validation(field_errors(&errors))
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(msg) => AppError::NotFound(msg),
            TaskError::AlreadyExists(detail) => {
                AppError::Conflict(format!("task already exists: {}", detail))
            }
            TaskError::Search(msg) => AppError::BadRequest(msg),
            TaskError::Validation(errors) => AppError::Validation(errors),
            TaskError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
