use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use super::models::{Task, TaskChanges, TaskPriority, TaskStatus};

/// Sea-ORM Entity for the tasks table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub author_id: String,
    pub project_id: String,
    pub created_at: Date,
    pub done_at: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            priority: model.priority,
            status: model.status,
            author_id: model.author_id,
            project_id: model.project_id,
            created_at: model.created_at,
            done_at: model.done_at,
        }
    }
}

impl From<Task> for ActiveModel {
    fn from(task: Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            priority: Set(task.priority),
            status: Set(task.status),
            author_id: Set(task.author_id),
            project_id: Set(task.project_id),
            created_at: Set(task.created_at),
            done_at: Set(task.done_at),
        }
    }
}

// created_at is fixed at creation.
impl From<TaskChanges> for ActiveModel {
    fn from(changes: TaskChanges) -> Self {
        ActiveModel {
            id: NotSet,
            title: changes.title.map_or(NotSet, Set),
            description: changes.description.map_or(NotSet, Set),
            priority: changes.priority.map_or(NotSet, Set),
            status: changes.status.map_or(NotSet, Set),
            author_id: changes.author_id.map_or(NotSet, Set),
            project_id: changes.project_id.map_or(NotSet, Set),
            created_at: NotSet,
            done_at: changes.done_at.map_or(NotSet, Set),
        }
    }
}
