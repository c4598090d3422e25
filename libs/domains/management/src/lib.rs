//! Management Domain
//!
//! Users, the projects they manage and the tasks they author, exposed as a
//! JSON REST API with create/read/update/delete and single-field search.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, JSON decoding, status mapping
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, id generation, failure logging
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, enums, search allow-lists
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_management::{ManagementService, handlers};
//!
//! let service = ManagementService::in_memory();
//! let router = handlers::router(service);
//! ```

pub mod common;
pub mod handlers;
pub mod projects;
pub mod service;
pub mod tasks;
pub mod users;

pub use common::{SearchRequest, generate_id, parse_date};
pub use projects::{
    CreateProject, InMemoryProjectRepository, PgProjectRepository, Project, ProjectError,
    ProjectRepository, ProjectResponse, ProjectSearchField, UpdateProject,
};
pub use service::ManagementService;
pub use tasks::{
    CreateTask, InMemoryTaskRepository, PgTaskRepository, Task, TaskError, TaskPriority,
    TaskRepository, TaskResponse, TaskSearchField, TaskStatus, UpdateTask,
};
pub use users::{
    CreateUser, InMemoryUserRepository, PgUserRepository, Role, UpdateUser, User, UserError,
    UserRepository, UserResponse, UserSearchField,
};
