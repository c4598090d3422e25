use super::shutdown::shutdown_signal;
use crate::errors::handlers::not_found;
use axum::Router;
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::sync::oneshot;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};

/// Wraps the API routes with the cross-cutting HTTP layers.
///
/// - API routes nested under `/api`
/// - 404 fallback for unknown routes
/// - request/response tracing
/// - a per-request deadline; when it fires the handler future is dropped
///
/// Health endpoints are merged by the binary, outside of `/api`.
pub fn create_router(apis: Router, request_timeout: Duration) -> Router {
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(request_timeout);

    Router::new()
        .nest("/api", apis)
        .fallback(not_found)
        .layer(timeout)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Serves `router` until SIGINT/SIGTERM, then drains.
///
/// After the signal the listener stops accepting connections and in-flight
/// requests get `server_config.shutdown_grace()` to finish. Anything still
/// running after that is aborted. `cleanup` runs last in both cases, which is
/// where the binary closes its connection pool.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails while running.
pub async fn create_app<F>(router: Router, server_config: &ServerConfig, cleanup: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let mut server = tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signalled_tx.send(());
            })
            .await
    });

    // Resolves on the signal, or early if the server task ends on its own.
    let _ = signalled_rx.await;

    let grace = server_config.shutdown_grace();
    let result = match tokio::time::timeout(grace, &mut server).await {
        Ok(Ok(served)) => served.inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        }),
        Ok(Err(join_error)) => Err(io::Error::other(join_error)),
        Err(_) => {
            warn!(grace_secs = grace.as_secs(), "Grace period elapsed, aborting in-flight requests");
            server.abort();
            Ok(())
        }
    };

    info!("Running shutdown cleanup");
    cleanup.await;

    result
}
