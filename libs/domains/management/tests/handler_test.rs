//! Handler tests for the management domain
//!
//! These tests drive the domain router with in-memory repositories and verify:
//! - Request decoding and validation responses
//! - Response serialization and status codes
//! - Search query handling
//!
//! The PostgreSQL repositories are covered by `integration_test.rs`.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_management::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use test_utils::assertions::assert_hex_id;
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(ManagementService::in_memory())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn alice() -> Value {
    json!({
        "name": "Alice",
        "email": "alice@example.com",
        "role": "admin",
        "registration_date": "2024-01-01"
    })
}

fn task_body(author_id: &str, project_id: &str) -> Value {
    json!({
        "title": "Write report",
        "description": "Quarterly numbers",
        "priority": "high",
        "status": "in_progress",
        "author_id": author_id,
        "project_id": project_id,
        "created_at": "2024-01-15",
        "done_at": "2024-02-01"
    })
}

async fn create(app: &Router, uri: &str, body: Value) -> String {
    let (status, bytes) = send(app, "POST", uri, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    String::from_utf8(bytes).unwrap()
}

#[tokio::test]
async fn test_create_user_then_get() {
    let app = app();

    let id = create(&app, "/users", alice()).await;
    assert_hex_id(&id, "created user id");

    let (status, bytes) = send(&app, "GET", &format!("/users/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&bytes),
        json!({
            "id": id,
            "name": "Alice",
            "email": "alice@example.com",
            "role": "admin",
            "registration_date": "2024-01-01"
        })
    );
}

#[tokio::test]
async fn test_create_task_without_title() {
    let app = app();
    let mut body = task_body("a1", "p1");
    body.as_object_mut().unwrap().remove("title");

    let (status, bytes) = send(&app, "POST", "/tasks", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = json_body(&bytes);
    assert!(
        errors
            .as_array()
            .unwrap()
            .contains(&json!({"message": "title is required", "field": "title"}))
    );
}

#[tokio::test]
async fn test_create_task_with_null_title() {
    let app = app();
    let mut body = task_body("a1", "p1");
    body["title"] = Value::Null;

    let (status, bytes) = send(&app, "POST", "/tasks", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(&bytes),
        json!([{"message": "title is required", "field": "title"}])
    );
}

#[tokio::test]
async fn test_create_user_without_json_content_type() {
    let app = app();

    for content_type in [None, Some("application/x-www-form-urlencoded")] {
        let mut builder = Request::builder().method("POST").uri("/users");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let email = format!("alice{}@example.com", content_type.map_or(0, |_| 1));
        let mut body = alice();
        body["email"] = json!(email);
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED, "{content_type:?}");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_hex_id(std::str::from_utf8(&bytes).unwrap(), "created user id");
    }
}

#[tokio::test]
async fn test_create_user_reports_every_invalid_field() {
    let app = app();

    let (status, bytes) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"email": "not-an-email", "role": "owner", "registration_date": "2024/01/01"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(&bytes),
        json!([
            {"message": "invalid email address", "field": "email"},
            {"message": "name is required", "field": "name"},
            {"message": "invalid registration_date format", "field": "registration_date"},
            {"message": "invalid role", "field": "role"}
        ])
    );
}

#[tokio::test]
async fn test_malformed_json_is_empty_400() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/projects")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"title": "#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_wrong_field_type_is_empty_400() {
    let app = app();

    let (status, bytes) = send(&app, "POST", "/users", Some(json!({"name": 42}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn test_update_user_rejects_unknown_role() {
    let app = app();
    let id = create(&app, "/users", alice()).await;

    let (status, bytes) = send(
        &app,
        "PUT",
        &format!("/users/{}", id),
        Some(json!({"role": "superadmin"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(&bytes),
        json!([{"message": "invalid role", "field": "role"}])
    );
}

#[tokio::test]
async fn test_update_with_no_fields_changes_nothing() {
    let app = app();
    let id = create(&app, "/users", alice()).await;
    let uri = format!("/users/{}", id);

    let (_, before) = send(&app, "GET", &uri, None).await;
    let (status, bytes) = send(&app, "PUT", &uri, Some(json!({"name": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());

    let (_, after) = send(&app, "GET", &uri, None).await;
    assert_eq!(json_body(&before), json_body(&after));
}

#[tokio::test]
async fn test_update_missing_project_is_404() {
    let app = app();

    let (status, _) = send(
        &app,
        "PUT",
        "/projects/0123456789abcdef01234567",
        Some(json!({"title": "Gemini"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = app();
    let id = create(&app, "/tasks", task_body("a1", "p1")).await;
    let uri = format!("/tasks/{}", id);

    let (status, bytes) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.is_empty());

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = app();
    create(&app, "/users", alice()).await;

    let (status, _) = send(&app, "POST", "/users", Some(alice())).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_list_users_empty_then_populated() {
    let app = app();

    let (status, bytes) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes), json!([]));

    create(&app, "/users", alice()).await;
    let (_, bytes) = send(&app, "GET", "/users", None).await;
    assert_eq!(json_body(&bytes).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_projects_by_manager_without_rows() {
    let app = app();

    let (status, _) = send(
        &app,
        "GET",
        "/projects/search?manager=0123456789abcdef01234567",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_projects_by_manager() {
    let app = app();
    let manager_id = create(&app, "/users", alice()).await;
    create(
        &app,
        "/projects",
        json!({
            "title": "Apollo",
            "description": "Moon landing",
            "started_at": "2024-01-15",
            "finished_at": "2024-06-30",
            "manager_id": manager_id
        }),
    )
    .await;

    let (status, bytes) = send(
        &app,
        "GET",
        &format!("/projects/search?manager={}", manager_id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let projects = json_body(&bytes);
    assert_eq!(projects[0]["title"], "Apollo");
    assert_eq!(projects[0]["started_at"], "2024-01-15");
}

#[tokio::test]
async fn test_search_uses_first_parameter_only() {
    let app = app();
    create(&app, "/tasks", task_body("a1", "p1")).await;

    let (status, bytes) = send(&app, "GET", "/tasks/search?status=in_progress&priority=low", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes).as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_rejects_bad_requests() {
    let app = app();

    for uri in [
        "/users/search",
        "/users/search?password=secret",
        "/users/search?name=",
        "/tasks/search?author_id=a1",
    ] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_user_and_project_tasks() {
    let app = app();
    create(&app, "/tasks", task_body("a1", "p1")).await;
    create(&app, "/tasks", task_body("a1", "p2")).await;
    create(&app, "/tasks", task_body("a2", "p1")).await;

    let (status, bytes) = send(&app, "GET", "/users/a1/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&bytes).as_array().unwrap().len(), 2);

    let (status, bytes) = send(&app, "GET", "/projects/p1/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    let tasks = json_body(&bytes);
    assert!(tasks.as_array().unwrap().iter().all(|t| t["project_id"] == "p1"));

    let (status, _) = send(&app, "GET", "/projects/p9/tasks", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_task_update_moves_project() {
    let app = app();
    let id = create(&app, "/tasks", task_body("a1", "p1")).await;
    let uri = format!("/tasks/{}", id);

    let (status, _) = send(&app, "PUT", &uri, Some(json!({"project_id": "p2", "status": "done"}))).await;
    assert_eq!(status, StatusCode::OK);

    let (_, bytes) = send(&app, "GET", &uri, None).await;
    let task = json_body(&bytes);
    assert_eq!(task["project_id"], "p2");
    assert_eq!(task["author_id"], "a1");
    assert_eq!(task["status"], "done");
    assert_eq!(task["created_at"], "2024-01-15");
}
