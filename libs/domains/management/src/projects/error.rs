use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, FieldError, field_errors};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("{0}")]
    NotFound(String),

    #[error("project already exists: {0}")]
    AlreadyExists(String),

    #[error("{0}")]
    Search(String),

    #[error("invalid project input")]
    Validation(Vec<FieldError>),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

impl ProjectError {
    pub fn not_found(id: &str) -> Self {
        ProjectError::NotFound(format!("project {} not found", id))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ProjectError::Internal(_))
    }
}

impl From<ValidationErrors> for ProjectError {
    fn from(errors: ValidationErrors) -> Self {
        ProjectError::Validation(field_errors(&errors))
    }
}

impl From<ProjectError> for AppError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::NotFound(msg) => AppError::NotFound(msg),
            ProjectError::AlreadyExists(detail) => {
                AppError::Conflict(format!("project already exists: {}", detail))
            }
            ProjectError::Search(msg) => AppError::BadRequest(msg),
            ProjectError::Validation(errors) => AppError::Validation(errors),
            ProjectError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProjectError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
