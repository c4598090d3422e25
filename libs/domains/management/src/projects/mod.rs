//! Projects: units of work with a manager and a schedule.

pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;

pub use error::{ProjectError, ProjectResult};
pub use models::{
    CreateProject, Project, ProjectChanges, ProjectResponse, ProjectSearchField, UpdateProject,
};
pub use postgres::PgProjectRepository;
pub use repository::{InMemoryProjectRepository, ProjectRepository};
