use axum_helpers::FieldError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

use super::error::{ProjectError, ProjectResult};
use crate::common::{date_field, empty_as_none, null_as_empty, validate_date};

/// Project entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub started_at: NaiveDate,
    pub finished_at: NaiveDate,
    /// Loose reference to the managing user; never checked.
    pub manager_id: String,
}

impl Project {
    pub fn matches(&self, field: ProjectSearchField, value: &str) -> bool {
        match field {
            ProjectSearchField::Title => self.title == value,
            ProjectSearchField::Manager => self.manager_id == value,
        }
    }
}

/// DTO for creating a project
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateProject {
    #[validate(length(max = 100, message = "title must be less than 100 characters"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[validate(length(max = 200, message = "description must be less than 200 characters"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[validate(custom(function = "validate_date", message = "invalid started_at format"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub started_at: String,
    #[validate(custom(function = "validate_date", message = "invalid finished_at format"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub finished_at: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub manager_id: String,
}

impl CreateProject {
    pub fn into_project(self, id: String) -> ProjectResult<Project> {
        let started_at = date_field(&self.started_at, "started_at", "invalid started_at format");
        let finished_at =
            date_field(&self.finished_at, "finished_at", "invalid finished_at format");

        let (started_at, finished_at) = match (started_at, finished_at) {
            (Ok(started), Ok(finished)) => (started, finished),
            (started, finished) => {
                let errors = [started.err(), finished.err()].into_iter().flatten().collect();
                return Err(ProjectError::Validation(errors));
            }
        };

        Ok(Project {
            id,
            title: self.title,
            description: self.description,
            started_at,
            finished_at,
            manager_id: self.manager_id,
        })
    }
}

/// DTO for a partial project update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProject {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 100, message = "title must be less than 100 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 200, message = "description must be less than 200 characters"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "validate_date", message = "invalid started_at format"))]
    pub started_at: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "validate_date", message = "invalid finished_at format"))]
    pub finished_at: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub manager_id: Option<String>,
}

impl UpdateProject {
    pub fn into_changes(self) -> ProjectResult<ProjectChanges> {
        let mut errors: Vec<FieldError> = Vec::new();
        let mut date = |value: Option<String>, field: &str, message: &str| {
            value.and_then(|v| {
                date_field(&v, field, message)
                    .map_err(|e| errors.push(e))
                    .ok()
            })
        };

        let started_at = date(self.started_at, "started_at", "invalid started_at format");
        let finished_at = date(self.finished_at, "finished_at", "invalid finished_at format");

        if !errors.is_empty() {
            return Err(ProjectError::Validation(errors));
        }

        Ok(ProjectChanges {
            title: self.title,
            description: self.description,
            started_at,
            finished_at,
            manager_id: self.manager_id,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub started_at: Option<NaiveDate>,
    pub finished_at: Option<NaiveDate>,
    pub manager_id: Option<String>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.started_at.is_none()
            && self.finished_at.is_none()
            && self.manager_id.is_none()
    }

    pub fn apply(self, project: &mut Project) {
        if let Some(title) = self.title {
            project.title = title;
        }
        if let Some(description) = self.description {
            project.description = description;
        }
        if let Some(started_at) = self.started_at {
            project.started_at = started_at;
        }
        if let Some(finished_at) = self.finished_at {
            project.finished_at = finished_at;
        }
        if let Some(manager_id) = self.manager_id {
            project.manager_id = manager_id;
        }
    }
}

/// Project as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub started_at: NaiveDate,
    pub finished_at: NaiveDate,
    pub manager_id: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            started_at: project.started_at,
            finished_at: project.finished_at,
            manager_id: project.manager_id,
        }
    }
}

/// Fields projects can be searched by. `manager` targets `manager_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ProjectSearchField {
    Title,
    Manager,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_helpers::field_errors;
    use std::str::FromStr;

    fn valid() -> CreateProject {
        CreateProject {
            title: "Apollo".to_string(),
            description: "Moon landing".to_string(),
            started_at: "2024-01-15".to_string(),
            finished_at: "2024-06-30".to_string(),
            manager_id: "0123456789abcdef01234567".to_string(),
        }
    }

    #[test]
    fn test_valid_create_project() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_title_length_counts_characters() {
        let input = CreateProject {
            title: "é".repeat(100),
            ..valid()
        };
        assert!(input.validate().is_ok());

        let input = CreateProject {
            title: "a".repeat(101),
            ..valid()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![FieldError::new("title", "title must be less than 100 characters")]
        );
    }

    #[test]
    fn test_description_allows_exactly_200() {
        let input = CreateProject {
            description: "d".repeat(200),
            ..valid()
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_missing_dates_are_reported() {
        let input: CreateProject = serde_json::from_str(r#"{"title":"Apollo"}"#).unwrap();
        let errors = input.validate().unwrap_err();
        assert_eq!(
            field_errors(&errors),
            vec![
                FieldError::new("finished_at", "invalid finished_at format"),
                FieldError::new("started_at", "invalid started_at format"),
            ]
        );
    }

    #[test]
    fn test_into_project_round_trips_dates() {
        let project = valid().into_project("id".to_string()).unwrap();
        let response = serde_json::to_value(ProjectResponse::from(project)).unwrap();
        assert_eq!(response["started_at"], "2024-01-15");
        assert_eq!(response["finished_at"], "2024-06-30");
    }

    #[test]
    fn test_update_accepts_started_at() {
        let update: UpdateProject =
            serde_json::from_str(r#"{"started_at":"2024-02-01","title":""}"#).unwrap();
        assert!(update.validate().is_ok());

        let changes = update.into_changes().unwrap();
        assert_eq!(changes.started_at, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(changes.title, None);
    }

    #[test]
    fn test_search_field_allow_list() {
        assert_eq!(
            ProjectSearchField::from_str("manager").unwrap(),
            ProjectSearchField::Manager
        );
        assert!(ProjectSearchField::from_str("manager_id").is_err());
        assert!(ProjectSearchField::from_str("description").is_err());
    }
}
