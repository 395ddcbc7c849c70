//! HTTP directory index for a OneDrive / SharePoint drive.
//!
//! Every `GET` path is looked up in the drive: folders are rendered as an
//! HTML listing and files redirect to their pre-authenticated download URL.

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

use std::future::Future;

use axum::{routing::get, Router};
use state::AppState;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::browse))
        .route("/{*path}", get(routes::browse))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve `router` on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
