use axum_helpers::FieldError;
use chrono::NaiveDate;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

use super::error::{TaskError, TaskResult};
use crate::common::{date_field, empty_as_none, null_as_empty, parse_date, validate_date, validate_required};

/// Task priority
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

/// Task status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TaskStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "done")]
    Done,
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub author_id: String,
    pub project_id: String,
    pub created_at: NaiveDate,
    pub done_at: NaiveDate,
}

impl Task {
    pub fn matches(&self, field: TaskSearchField, value: &str) -> bool {
        match field {
            TaskSearchField::Title => self.title == value,
            TaskSearchField::Description => self.description == value,
            TaskSearchField::Priority => {
                TaskPriority::from_str(value).is_ok_and(|p| p == self.priority)
            }
            TaskSearchField::Status => TaskStatus::from_str(value).is_ok_and(|s| s == self.status),
            TaskSearchField::Assignee => self.author_id == value,
            TaskSearchField::ProjectId => self.project_id == value,
            TaskSearchField::CreatedAt => parse_date(value) == Some(self.created_at),
            TaskSearchField::DoneAt => parse_date(value) == Some(self.done_at),
        }
    }
}

fn validate_priority(value: &str) -> Result<(), ValidationError> {
    TaskPriority::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("priority"))
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    TaskStatus::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

fn invalid(field: &str, message: &str) -> TaskError {
    TaskError::Validation(vec![FieldError::new(field, message)])
}

/// DTO for creating a task
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateTask {
    #[validate(
        custom(function = "validate_required", message = "title is required"),
        length(max = 100, message = "title must be less than 100 characters")
    )]
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[validate(
        custom(function = "validate_required", message = "description is required"),
        length(max = 199, message = "description must be less than 200 characters")
    )]
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[validate(custom(function = "validate_priority", message = "invalid priority value"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub priority: String,
    #[validate(custom(function = "validate_status", message = "invalid status value"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub author_id: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub project_id: String,
    #[validate(custom(function = "validate_date", message = "invalid created_at format"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub created_at: String,
    #[validate(custom(function = "validate_date", message = "invalid done_at format"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub done_at: String,
}

impl CreateTask {
    pub fn into_task(self, id: String) -> TaskResult<Task> {
        let priority = TaskPriority::from_str(&self.priority)
            .map_err(|_| invalid("priority", "invalid priority value"))?;
        let status = TaskStatus::from_str(&self.status)
            .map_err(|_| invalid("status", "invalid status value"))?;
        let created_at = date_field(&self.created_at, "created_at", "invalid created_at format")
            .map_err(|e| TaskError::Validation(vec![e]))?;
        let done_at = date_field(&self.done_at, "done_at", "invalid done_at format")
            .map_err(|e| TaskError::Validation(vec![e]))?;

        Ok(Task {
            id,
            title: self.title,
            description: self.description,
            priority,
            status,
            author_id: self.author_id,
            project_id: self.project_id,
            created_at,
            done_at,
        })
    }
}

/// DTO for a partial task update. `created_at` cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTask {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 100, message = "title must be less than 100 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 199, message = "description must be less than 200 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "validate_priority", message = "invalid priority value"))]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "validate_status", message = "invalid status value"))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub author_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "validate_date", message = "invalid done_at format"))]
    pub done_at: Option<String>,
}

impl UpdateTask {
    pub fn into_changes(self) -> TaskResult<TaskChanges> {
        let priority = self
            .priority
            .map(|p| TaskPriority::from_str(&p))
            .transpose()
            .map_err(|_| invalid("priority", "invalid priority value"))?;
        let status = self
            .status
            .map(|s| TaskStatus::from_str(&s))
            .transpose()
            .map_err(|_| invalid("status", "invalid status value"))?;
        let done_at = self
            .done_at
            .map(|d| date_field(&d, "done_at", "invalid done_at format"))
            .transpose()
            .map_err(|e| TaskError::Validation(vec![e]))?;

        Ok(TaskChanges {
            title: self.title,
            description: self.description,
            priority,
            status,
            author_id: self.author_id,
            project_id: self.project_id,
            done_at,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub author_id: Option<String>,
    pub project_id: Option<String>,
    pub done_at: Option<NaiveDate>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.status.is_none()
            && self.author_id.is_none()
            && self.project_id.is_none()
            && self.done_at.is_none()
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(author_id) = self.author_id {
            task.author_id = author_id;
        }
        if let Some(project_id) = self.project_id {
            task.project_id = project_id;
        }
        if let Some(done_at) = self.done_at {
            task.done_at = done_at;
        }
    }
}

/// Task as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub author_id: String,
    pub project_id: String,
    pub created_at: NaiveDate,
    pub done_at: NaiveDate,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            status: task.status,
            author_id: task.author_id,
            project_id: task.project_id,
            created_at: task.created_at,
            done_at: task.done_at,
        }
    }
}

/// Fields tasks can be searched by. `assignee` targets `author_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TaskSearchField {
    Title,
    Description,
    Priority,
    Status,
    Assignee,
    ProjectId,
    CreatedAt,
    DoneAt,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::field_errors;

    fn valid() -> CreateTask {
        CreateTask {
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            priority: "high".to_string(),
            status: "in_progress".to_string(),
            author_id: "a1".to_string(),
            project_id: "p1".to_string(),
            created_at: "2024-01-15".to_string(),
            done_at: "2024-02-01".to_string(),
        }
    }

    #[test]
    fn test_valid_create_task() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_title_is_required() {
        let input: CreateTask = serde_json::from_value(serde_json::json!({
            "description": "Quarterly numbers",
            "priority": "low",
            "status": "active",
            "created_at": "2024-01-15",
            "done_at": "2024-02-01"
        }))
        .unwrap();

        let errors = input.validate().unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![FieldError::new("title", "title is required")]
        );
    }

    #[test]
    fn test_null_title_is_required() {
        let mut body = serde_json::to_value(valid()).unwrap();
        body["title"] = serde_json::Value::Null;

        let input: CreateTask = serde_json::from_value(body).unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![FieldError::new("title", "title is required")]
        );
    }

    #[test]
    fn test_description_must_be_under_200() {
        let input = CreateTask {
            description: "d".repeat(199),
            ..valid()
        };
        assert!(input.validate().is_ok());

        let input = CreateTask {
            description: "d".repeat(200),
            ..valid()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![FieldError::new(
                "description",
                "description must be less than 200 characters"
            )]
        );
    }

    #[test]
    fn test_enum_values() {
        let input = CreateTask {
            priority: "urgent".to_string(),
            status: "in-progress".to_string(),
            ..valid()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![
                FieldError::new("priority", "invalid priority value"),
                FieldError::new("status", "invalid status value"),
            ]
        );
    }

    #[test]
    fn test_status_wire_format() {
        let task = valid().into_task("t1".to_string()).unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);

        let json = serde_json::to_value(TaskResponse::from(task)).unwrap();
        assert_eq!(json["status"], "in_progress");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["created_at"], "2024-01-15");
    }

    #[test]
    fn test_update_keeps_project_and_author_apart() {
        let update: UpdateTask =
            serde_json::from_str(r#"{"project_id":"p2","author_id":""}"#).unwrap();
        let changes = update.into_changes().unwrap();
        assert_eq!(changes.project_id.as_deref(), Some("p2"));
        assert_eq!(changes.author_id, None);
    }

    #[test]
    fn test_update_ignores_created_at() {
        let update: UpdateTask = serde_json::from_str(r#"{"created_at":"2030-01-01"}"#).unwrap();
        assert!(update.into_changes().unwrap().is_empty());
    }

    #[test]
    fn test_matches_dates_and_enums() {
        let task = valid().into_task("t1".to_string()).unwrap();
        assert!(task.matches(TaskSearchField::CreatedAt, "2024-01-15"));
        assert!(!task.matches(TaskSearchField::CreatedAt, "yesterday"));
        assert!(task.matches(TaskSearchField::Status, "in_progress"));
        assert!(!task.matches(TaskSearchField::Priority, "HIGH"));
        assert!(task.matches(TaskSearchField::Assignee, "a1"));
    }

    #[test]
    fn test_search_field_names() {
        assert_eq!(
            TaskSearchField::from_str("project_id").unwrap(),
            TaskSearchField::ProjectId
        );
        assert_eq!(TaskSearchField::DoneAt.to_string(), "done_at");
        assert!(TaskSearchField::from_str("author_id").is_err());
    }
}
