use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::error::{TaskError, TaskResult};
use super::models::{Task, TaskChanges, TaskSearchField};
use crate::common::no_matches;

/// Repository trait for Task persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: Task) -> TaskResult<String>;

    async fn get(&self, id: &str) -> TaskResult<Task>;

    async fn list(&self) -> TaskResult<Vec<Task>>;

    async fn update(&self, id: &str, changes: TaskChanges) -> TaskResult<()>;

    async fn delete(&self, id: &str) -> TaskResult<()>;

    /// Values that cannot be stored in the column (bad dates, unknown
    /// enum values) match nothing.
    async fn search(&self, field: TaskSearchField, value: &str) -> TaskResult<Vec<Task>>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<String, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    tasks
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: Task) -> TaskResult<String> {
        let mut tasks = self.tasks.write().await;

        if tasks.contains_key(&task.id) {
            return Err(TaskError::AlreadyExists(format!("id {}", task.id)));
        }

        let id = task.id.clone();
        tasks.insert(id.clone(), task);

        tracing::info!(task_id = %id, "Created task");
        Ok(id)
    }

    async fn get(&self, id: &str) -> TaskResult<Task> {
        let tasks = self.tasks.read().await;
        tasks.get(id).cloned().ok_or_else(|| TaskError::not_found(id))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(sorted(tasks.values().cloned().collect()))
    }

    async fn update(&self, id: &str, changes: TaskChanges) -> TaskResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut tasks = self.tasks.write().await;
        let task = tasks.get_mut(id).ok_or_else(|| TaskError::not_found(id))?;
        changes.apply(task);

        tracing::info!(task_id = %id, "Updated task");
        Ok(())
    }

    async fn delete(&self, id: &str) -> TaskResult<()> {
        let mut tasks = self.tasks.write().await;
        tasks.remove(id).ok_or_else(|| TaskError::not_found(id))?;

        tracing::info!(task_id = %id, "Deleted task");
        Ok(())
    }

    async fn search(&self, field: TaskSearchField, value: &str) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        let found: Vec<Task> = tasks
            .values()
            .filter(|t| t.matches(field, value))
            .cloned()
            .collect();

        if found.is_empty() {
            return Err(TaskError::NotFound(no_matches("tasks", field, value)));
        }
        Ok(sorted(found))
    }
}
