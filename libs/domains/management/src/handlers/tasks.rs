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
use crate::tasks::{CreateTask, TaskResponse, TaskResult, UpdateTask};

pub(super) fn router() -> Router<SharedService> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/search", get(search_tasks))
        .route("/{id}", get(get_task).put(update_task).delete(delete_task))
}

async fn create_task(
    State(service): State<SharedService>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> Result<impl IntoResponse, AppError> {
    let id = service.create_task(input).await.map_err(crud_error)?;
    Ok((StatusCode::CREATED, id))
}

async fn list_tasks(
    State(service): State<SharedService>,
) -> Result<Json<Vec<TaskResponse>>, AppError> {
    let tasks = service.list_tasks().await.map_err(crud_error)?;
    Ok(Json(tasks))
}

/// Search tasks, e.g. `?status=in_progress` or `?assignee=<user id>`
async fn search_tasks(
    State(service): State<SharedService>,
    Query(params): Query<Vec<(String, String)>>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = service.search_tasks(SearchRequest::from_query(params)).await?;
    Ok(Json(tasks))
}

async fn get_task(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, AppError> {
    let task = service.get_task(&id).await.map_err(crud_error)?;
    Ok(Json(task))
}

async fn update_task(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> Result<StatusCode, AppError> {
    service.update_task(&id, input).await.map_err(crud_error)?;
    Ok(StatusCode::OK)
}

async fn delete_task(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service.delete_task(&id).await.map_err(crud_error)?;
    Ok(StatusCode::OK)
}
