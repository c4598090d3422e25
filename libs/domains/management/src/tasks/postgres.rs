use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use std::str::FromStr;

use super::entity::{self, Column, Entity};
use super::error::{TaskError, TaskResult};
use super::models::{Task, TaskChanges, TaskPriority, TaskSearchField, TaskStatus};
use super::repository::TaskRepository;
use crate::common::{no_matches, parse_date};

/// PostgreSQL implementation of TaskRepository
#[derive(Clone)]
pub struct PgTaskRepository {
    db: DatabaseConnection,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_error(err: DbErr) -> TaskError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => TaskError::AlreadyExists(detail),
        _ => TaskError::Internal(format!("Database error: {}", err)),
    }
}

/// `None` when `value` cannot appear in the column.
fn condition(field: TaskSearchField, value: &str) -> Option<Condition> {
    let expr = match field {
        TaskSearchField::Title => Column::Title.eq(value),
        TaskSearchField::Description => Column::Description.eq(value),
        TaskSearchField::Priority => Column::Priority.eq(TaskPriority::from_str(value).ok()?),
        TaskSearchField::Status => Column::Status.eq(TaskStatus::from_str(value).ok()?),
        TaskSearchField::Assignee => Column::AuthorId.eq(value),
        TaskSearchField::ProjectId => Column::ProjectId.eq(value),
        TaskSearchField::CreatedAt => Column::CreatedAt.eq(parse_date(value)?),
        TaskSearchField::DoneAt => Column::DoneAt.eq(parse_date(value)?),
    };
    Some(Condition::all().add(expr))
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: Task) -> TaskResult<String> {
        let id = task.id.clone();

        let inserted = Entity::insert(entity::ActiveModel::from(task))
            .exec_without_returning(&self.db)
            .await
            .map_err(db_error)?;
        if inserted == 0 {
            return Err(TaskError::not_found(&id));
        }

        tracing::info!(task_id = %id, "Created task");
        Ok(id)
    }

    async fn get(&self, id: &str) -> TaskResult<Task> {
        Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Task::from)
            .ok_or_else(|| TaskError::not_found(id))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = Entity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Task::from).collect())
    }

    async fn update(&self, id: &str, changes: TaskChanges) -> TaskResult<()> {
        if changes.is_empty() {
            return Ok(());
        }

        let result = Entity::update_many()
            .set(entity::ActiveModel::from(changes))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(TaskError::not_found(id));
        }

        tracing::info!(task_id = %id, "Updated task");
        Ok(())
    }

    async fn delete(&self, id: &str) -> TaskResult<()> {
        let result = Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(TaskError::not_found(id));
        }

        tracing::info!(task_id = %id, "Deleted task");
        Ok(())
    }

    async fn search(&self, field: TaskSearchField, value: &str) -> TaskResult<Vec<Task>> {
        let Some(condition) = condition(field, value) else {
            return Err(TaskError::NotFound(no_matches("tasks", field, value)));
        };

        let models = Entity::find()
            .filter(condition)
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(db_error)?;

        if models.is_empty() {
            return Err(TaskError::NotFound(no_matches("tasks", field, value)));
        }
        Ok(models.into_iter().map(Task::from).collect())
    }
}
