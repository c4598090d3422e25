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
use crate::projects::{CreateProject, ProjectResponse, ProjectResult, UpdateProject};
use crate::tasks::{TaskResponse, TaskResult};

pub(super) fn router() -> Router<SharedService> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/search", get(search_projects))
        .route("/{id}", get(get_project).put(update_project).delete(delete_project))
        .route("/{id}/tasks", get(list_project_tasks))
}

/// Create a project, responding with its id as plain text
async fn create_project(
    State(service): State<SharedService>,
    ValidatedJson(input): ValidatedJson<CreateProject>,
) -> Result<impl IntoResponse, AppError> {
    let id = service.create_project(input).await.map_err(crud_error)?;
    Ok((StatusCode::CREATED, id))
}

async fn list_projects(
    State(service): State<SharedService>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let projects = service.list_projects().await.map_err(crud_error)?;
    Ok(Json(projects))
}

/// Search projects by `title` or `manager`
async fn search_projects(
    State(service): State<SharedService>,
    Query(params): Query<Vec<(String, String)>>,
) -> ProjectResult<Json<Vec<ProjectResponse>>> {
    let projects = service.search_projects(SearchRequest::from_query(params)).await?;
    Ok(Json(projects))
}

async fn get_project(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    let project = service.get_project(&id).await.map_err(crud_error)?;
    Ok(Json(project))
}

async fn update_project(
    State(service): State<SharedService>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateProject>,
) -> Result<StatusCode, AppError> {
    service.update_project(&id, input).await.map_err(crud_error)?;
    Ok(StatusCode::OK)
}

async fn delete_project(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    service.delete_project(&id).await.map_err(crud_error)?;
    Ok(StatusCode::OK)
}

/// Tasks belonging to the given project
async fn list_project_tasks(
    State(service): State<SharedService>,
    Path(id): Path<String>,
) -> TaskResult<Json<Vec<TaskResponse>>> {
    let tasks = service.list_project_tasks(&id).await?;
    Ok(Json(tasks))
}
