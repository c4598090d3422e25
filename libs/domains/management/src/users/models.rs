use axum_helpers::FieldError;
use chrono::NaiveDate;
use regex::Regex;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::LazyLock;
use strum::{Display, EnumString};
use validator::{Validate, ValidationError};

use super::error::{UserError, UserResult};
use crate::common::{date_field, empty_as_none, null_as_empty, validate_date, validate_required};

// ASCII only: the regex crate's `\w` would also admit non-ASCII letters.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$").expect("email pattern is a valid regex")
});

/// User role
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
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
}

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub registration_date: NaiveDate,
}

impl User {
    /// Exact-match test used by the in-memory repository.
    pub fn matches(&self, field: UserSearchField, value: &str) -> bool {
        match field {
            UserSearchField::Name => self.name == value,
            UserSearchField::Email => self.email == value,
            UserSearchField::Role => Role::from_str(value).is_ok_and(|role| role == self.role),
        }
    }
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    Role::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("role"))
}

/// DTO for creating a user. Missing or `null` fields decode as empty strings and fail validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateUser {
    #[validate(custom(function = "validate_required", message = "name is required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[validate(regex(path = *EMAIL_REGEX, message = "invalid email address"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,
    #[validate(custom(function = "validate_role", message = "invalid role"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub role: String,
    #[validate(custom(function = "validate_date", message = "invalid registration_date format"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub registration_date: String,
}

impl CreateUser {
    /// Builds the entity for an already validated request.
    pub fn into_user(self, id: String) -> UserResult<User> {
        let role = Role::from_str(&self.role)
            .map_err(|_| UserError::Validation(vec![FieldError::new("role", "invalid role")]))?;
        let registration_date = date_field(
            &self.registration_date,
            "registration_date",
            "invalid registration_date format",
        )
        .map_err(|e| UserError::Validation(vec![e]))?;

        Ok(User {
            id,
            name: self.name,
            email: self.email,
            role,
            registration_date,
        })
    }
}

/// DTO for a partial user update. Absent or empty fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUser {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(regex(path = *EMAIL_REGEX, message = "invalid email address"))]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(custom(function = "validate_role", message = "invalid role"))]
    pub role: Option<String>,
}

impl UpdateUser {
    pub fn into_changes(self) -> UserResult<UserChanges> {
        let role = self
            .role
            .map(|r| Role::from_str(&r))
            .transpose()
            .map_err(|_| UserError::Validation(vec![FieldError::new("role", "invalid role")]))?;

        Ok(UserChanges {
            name: self.name,
            email: self.email,
            role,
        })
    }
}

/// The populated subset of an update, without the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }

    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
    }
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub registration_date: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            registration_date: user.registration_date,
        }
    }
}

/// Fields users can be searched by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum UserSearchField {
    Name,
    Email,
    Role,
}
