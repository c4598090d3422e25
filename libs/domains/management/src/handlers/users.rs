use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{AppError, ValidatedJson};

use super::{SharedService, crud_error};
use crate::common::SearchRequest;
use crate::tasks::{TaskResponse, TaskResult};
use crate::users::{CreateUser, UpdateUser, UserResponse, UserResult};

pub(super) fn router() -> Router<SharedService> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/search", get(search_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/tasks", get(list_user_tasks))
}

/// Create a user, responding with its id as plain text
async fn create_user(
    State(service): State<SharedService>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> Result<impl IntoResponse, AppError> {
    let id = service.create_user(input).await.map_err(crud_error)?;
    Ok((StatusCode::CREATED, id))
}

async fn list_users(
    State(service): State<SharedService>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = service.list_users().await.map_err(crud_error)?;
    Ok(Json(users))
}

/// Search users by one of `name`, `email` or `role`
async fn search_users(
    State(service): State<SharedService>,
    Query(params): Query<Vec<(String, String)>>,
) -> UserResult<Json<Vec<UserResponse>>> {
    let users = service.search_users(SearchRequest::from_query(params)).await?;
    Ok(Json(users))
}

async fn get_user(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = service.get_user(&id).await.map_err(crud_error)?;
    Ok(Json(user))
}

async fn update_user(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> Result<StatusCode, AppError> {
    service.update_user(&id, input).await.map_err(crud_error)?;
    Ok(StatusCode::OK)
}

async fn delete_user(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service.delete_user(&id).await.map_err(crud_error)?;
    Ok(StatusCode::OK)
}

/// Tasks whose author is the given user
async fn list_user_tasks(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = service.list_user_tasks(&id).await?;
    Ok(Json(tasks))
}
