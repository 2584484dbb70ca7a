//! Web front door — HTML status page and JSON container search.
//!
//! Routes:
//!   - `GET /`        → status page with Docker, Compose and cluster versions
//!   - `GET /search`  → `?container=<image substring>` lookup as JSON
//!   - `GET /health`  → liveness probe

mod handlers;
mod page;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use kubedash_common::EnvironmentInfo;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::application::ports::ContainerEngine;

pub use handlers::{NO_SUCH_RESOURCE, SearchParams};
pub use page::render_index;

/// Shared state handed to every request handler.
pub struct WebState<E> {
    /// Probe results captured at startup.
    pub env: EnvironmentInfo,
    /// Docker Engine used by `/search`.
    pub engine: E,
}

impl<E> WebState<E> {
    pub fn new(env: EnvironmentInfo, engine: E) -> Self {
        Self { env, engine }
    }
}

/// Build the axum router over `state`.
pub fn router<E>(state: Arc<WebState<E>>) -> Router
where
    E: ContainerEngine + 'static,
{
    Router::new()
        .route("/", get(handlers::index::<E>))
        .route("/search", get(handlers::search::<E>))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Owns the single-instance guard for the HTTP listener.
///
/// The guard is held for as long as the server runs, so a second `start`
/// waits for the first to return instead of racing it for the port.
#[derive(Default)]
pub struct WebServer {
    lock: Mutex<()>,
}

impl WebServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `addr` and serve `router` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn start<F>(&self, addr: SocketAddr, router: Router, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let _guard = self.lock.lock().await;
        tracing::info!(%addr, "launching web application");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to create listening port on {addr}"))?;
        let local = listener.local_addr().context("listener has no local address")?;
        tracing::info!("listening and serving HTTP on {local}");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server error")?;

        tracing::info!("web application stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
