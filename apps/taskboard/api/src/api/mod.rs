use axum::{Router, routing::get};
use database::postgres::DatabaseConnection;
use domain_management::{
    ManagementService, PgProjectRepository, PgTaskRepository, PgUserRepository, handlers,
};
use std::sync::Arc;

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Repositories share the pool; cloning a `DatabaseConnection` only clones a handle.
pub fn routes(db: &DatabaseConnection) -> Router {
    let service = ManagementService::new(
        Arc::new(PgUserRepository::new(db.clone())),
        Arc::new(PgProjectRepository::new(db.clone())),
        Arc::new(PgTaskRepository::new(db.clone())),
    );

    Router::new().nest("/v1", handlers::router(service))
}

/// Creates a router with the /ready endpoint that checks the database.
pub fn ready_router(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(db)
}
