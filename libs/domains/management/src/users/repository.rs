use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{UserError, UserResult};
use super::models::{User, UserChanges, UserSearchField};
use crate::common::no_matches;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, returning its id
    async fn create(&self, user: User) -> UserResult<String>;

    async fn get(&self, id: &str) -> UserResult<User>;

    async fn list(&self) -> UserResult<Vec<User>>;

    /// Write the populated fields of `changes`; an empty change set is a no-op
    async fn update(&self, id: &str, changes: UserChanges) -> UserResult<()>;

    async fn delete(&self, id: &str) -> UserResult<()>;

    /// Exact-match search on one column; no matches is `NotFound`
    async fn search(&self, field: UserSearchField, value: &str) -> UserResult<Vec<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut users: Vec<User>) -> Vec<User> {
    users.sort_by(|a, b| {
        a.registration_date
            .cmp(&b.registration_date)
            .then_with(|| a.id.cmp(&b.id))
    });
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> UserResult<String> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(UserError::AlreadyExists(format!("id {}", user.id)));
        }
        // Mirrors the unique index on users.email
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::AlreadyExists(format!("email {}", user.email)));
        }

        let id = user.id.clone();
        users.insert(id.clone(), user);

        tracing::info!(user_id = %id, "Created user");
        Ok(id)
    }

    async fn get(&self, id: &str) -> UserResult<User> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or_else(|| UserError::not_found(id))
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(sorted(users.values().cloned().collect()))
    }

    async fn update(&self, id: &str, changes: UserChanges) -> UserResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut users = self.users.write().await;

        if !users.contains_key(id) {
            return Err(UserError::not_found(id));
        }
        if let Some(email) = &changes.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(UserError::AlreadyExists(format!("email {}", email)));
            }
        }

        if let Some(user) = users.get_mut(id) {
            changes.apply(user);
        }

        tracing::info!(user_id = %id, "Updated user");
        Ok(())
    }

    async fn delete(&self, id: &str) -> UserResult<()> {
        let mut users = self.users.write().await;

        match users.remove(id) {
            Some(_) => {
                tracing::info!(user_id = %id, "Deleted user");
                Ok(())
            }
            None => Err(UserError::not_found(id)),
        }
    }

    async fn search(&self, field: UserSearchField, value: &str) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let found: Vec<User> = users
            .values()
            .filter(|u| u.matches(field, value))
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(UserError::NotFound(no_matches("users", field, value)));
        }
        Ok(sorted(found))
    }
}
