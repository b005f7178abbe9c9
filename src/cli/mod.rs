//! CLI argument definitions for wheelhouse.

use clap::Parser;
use std::path::PathBuf;

use crate::server::{DEFAULT_PORT, DEFAULT_STREAM_INTERVAL_SECS};

/// Default heartbeat staleness window in seconds.
pub const DEFAULT_HEARTBEAT_STALE_SECS: i64 = 120;

/// Wheelhouse - read-only web control panel for the orchestrator's
/// state root.
///
/// Serves a live dashboard and a JSON status API over the flat state
/// files the orchestrator writes. Never writes to the state root itself.
#[derive(Parser, Debug)]
#[command(name = "wh")]
#[command(author, version, about = "Web control panel for the orchestrator state root", long_about = None)]
pub struct Cli {
    /// State root directory the orchestrator writes into.
    /// Defaults to ~/wheelhouse. Can also be set via WH_ROOT.
    #[arg(short = 'r', long = "root", env = "WH_ROOT")]
    pub root: Option<PathBuf>,

    /// Port to listen on
    #[arg(short = 'p', long, env = "WH_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Seconds between pushes on the live-update stream
    #[arg(long = "interval-secs", default_value_t = DEFAULT_STREAM_INTERVAL_SECS)]
    pub interval_secs: u64,

    /// Seconds after which an agent heartbeat counts as stale
    #[arg(
        long = "heartbeat-stale-secs",
        env = "WH_HEARTBEAT_STALE_SECS",
        default_value_t = DEFAULT_HEARTBEAT_STALE_SECS
    )]
    pub heartbeat_stale_secs: i64,
}
