use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError, field_errors};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("{0}")]
    NotFound(String),

    #[error("user already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Search(String),

    #[error("invalid user input")]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub fn not_found(id: &str) -> Self {
        UserError::NotFound(format!("user {} not found", id))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, UserError::Internal(_))
    }
}

impl From<ValidationErrors> for UserError {
    fn from(errors: ValidationErrors) -> Self {
        UserError::Validation(field_errors(&errors))
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(msg) => AppError::NotFound(msg),
            UserError::AlreadyExists(detail) => {
                AppError::Conflict(format!("user already exists: {}", detail))
            }
            UserError::Search(msg) => AppError::BadRequest(msg),
            UserError::Validation(errors) => AppError::Validation(errors),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
