//! Wheelhouse - a read-only web control panel for an agent-orchestration
//! control plane.
//!
//! This library provides the core functionality for the `wh` binary:
//! parsing the orchestrator's on-disk state records, aggregating them into
//! a point-in-time status snapshot, and serving that snapshot over HTTP.
//!
//! The orchestrator and its workers own every file under the state root;
//! wheelhouse never writes there. Absence of a file or directory is a
//! normal condition (the orchestrator may not have started yet), so the
//! readers report empty results rather than errors.

pub mod cli;
pub mod layout;
pub mod server;
pub mod state;
pub mod status;

/// Library-level error type for wheelhouse operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for wheelhouse operations.
pub type Result<T> = std::result::Result<T, Error>;
