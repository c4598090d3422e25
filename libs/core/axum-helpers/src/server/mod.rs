//! Server infrastructure module.
//!
//! - router assembly with tracing, timeout and 404 fallback
//! - liveness and readiness helpers
//! - graceful shutdown with a bounded grace period
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router(api_routes, config.server.request_timeout())
//!     .merge(health_router(app_info!()));
//!
//! create_app(router, &config.server, async move { db.close().await.ok(); }).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use shutdown::shutdown_signal;
