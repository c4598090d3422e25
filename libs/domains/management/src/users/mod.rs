//! Users: people who manage projects and are assigned tasks.

pub mod entity;
pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;

pub use error::{UserError, UserResult};
pub use models::{CreateUser, Role, UpdateUser, User, UserChanges, UserResponse, UserSearchField};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
