//! Tasks: work items authored by a user within a project.

pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;

pub use error::{TaskError, TaskResult};
pub use models::{
    CreateTask, Task, TaskChanges, TaskPriority, TaskResponse, TaskSearchField, TaskStatus,
    UpdateTask,
};
pub use postgres::PgTaskRepository;
pub use repository::{InMemoryTaskRepository, TaskRepository};
