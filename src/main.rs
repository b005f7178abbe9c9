//! Wheelhouse CLI - serve the orchestrator status dashboard.

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use wheelhouse::cli::Cli;
use wheelhouse::layout::{default_root, StateLayout};
use wheelhouse::server::{start_server, AppState};
use wheelhouse::state::LivenessPolicy;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let root = resolve_root(cli.root);
    let state = AppState::new(
        StateLayout::new(root),
        LivenessPolicy::with_stale_secs(cli.heartbeat_stale_secs),
        Duration::from_secs(cli.interval_secs.max(1)),
    );

    if let Err(e) = start_server(state, cli.port, &cli.host).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Resolve the state root: --root flag > WH_ROOT env > ~/wheelhouse.
///
/// An explicit root that does not exist yet is used as given - the
/// orchestrator may simply not have started - but is worth a warning.
fn resolve_root(explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => {
            if !path.exists() {
                tracing::warn!(root = %path.display(), "state root does not exist yet");
            }
            path
        }
        None => default_root(),
    }
}
