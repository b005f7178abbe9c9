//! Web server for the dashboard and status API endpoints.
//!
//! Every handler is a pure read-and-compose over the state root: no
//! shared mutable application state, no locks, no caching. Each request
//! (and each live-stream tick) re-derives its view from disk.

mod routes;
mod stream;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::layout::StateLayout;
use crate::state::LivenessPolicy;
use crate::{Error, Result};

/// Default port for the control panel.
pub const DEFAULT_PORT: u16 = 4747;

/// Default seconds between live-update pushes.
pub const DEFAULT_STREAM_INTERVAL_SECS: u64 = 3;

/// Shared application state.
///
/// Everything here is immutable configuration; handlers re-read the
/// filesystem on every request, so no synchronization is needed.
#[derive(Clone)]
pub struct AppState {
    /// Resolved paths into the orchestrator's state root
    pub layout: Arc<StateLayout>,
    /// Heartbeat staleness policy
    pub policy: LivenessPolicy,
    /// Cadence of the live-update stream
    pub stream_interval: Duration,
}

impl AppState {
    /// Build application state for the given root and policy.
    pub fn new(layout: StateLayout, policy: LivenessPolicy, stream_interval: Duration) -> Self {
        Self {
            layout: Arc::new(layout),
            policy,
            stream_interval,
        }
    }
}

/// Build the route table.
///
/// The entire surface is read-only GETs; unknown paths fall through to a
/// JSON 404.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::serve_index))
        .route("/api/status", get(routes::get_status))
        .route("/api/rigs", get(routes::get_rigs))
        .route("/api/polecats", get(routes::get_polecats))
        .route("/api/dogs", get(routes::get_dogs))
        .route("/api/crew", get(routes::get_crew))
        .route("/api/merge-queue", get(routes::get_merge_queue))
        .route("/api/log", get(routes::get_log))
        .route("/api/agents", get(routes::get_agents))
        .route("/api/molecules", get(routes::get_molecules))
        .route("/api/escalation", get(routes::get_escalation))
        .route("/api/events", get(stream::events))
        .fallback(routes::not_found)
        .with_state(state)
}

/// Start the control panel server.
pub async fn start_server(state: AppState, port: u16, host: &str) -> Result<()> {
    let root = state.layout.root().to_path_buf();

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let host_addr: std::net::IpAddr = host
        .parse()
        .map_err(|e| Error::InvalidAddress(format!("{}: {}", host, e)))?;
    let addr = SocketAddr::from((host_addr, port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    println!("Wheelhouse control panel at http://{}", local);
    println!("State root: {}", root.display());
    println!("Press Ctrl+C to stop");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
