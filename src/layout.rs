//! On-disk layout of the orchestrator's state root.
//!
//! Every path wheelhouse reads is derived from a single injected root
//! directory, so tests (and parallel server instances) can point at
//! isolated temporary roots. The layout itself is a read-only contract
//! with the orchestrator:
//!
//! ```text
//! <root>/
//!   wheelhouse.log           append-only text log
//!   molecules/               task definition files
//!   .wheelhouse/             config subdirectory
//!     rigs/                  one URL file per rig
//!     polecats/              KEY=value state, one file per worker
//!     dogs/                  KEY=value state, one file per watchdog
//!     crew/                  KEY=value state, one file per crew member
//!     merge-queue/           KEY=value state, one file per queued merge
//!     daemon.pid             daemon process id
//!     deacon-heartbeat.json  heartbeat document
//!     escalation.json        escalation policy (optional)
//! ```

use std::path::{Path, PathBuf};

/// Name of the config subdirectory under the state root.
pub const CONFIG_DIR: &str = ".wheelhouse";

/// Name of the append-only log file under the state root.
pub const LOG_FILE: &str = "wheelhouse.log";

/// Resolved paths into one orchestrator state root.
#[derive(Debug, Clone)]
pub struct StateLayout {
    root: PathBuf,
}

impl StateLayout {
    /// Create a layout rooted at the given directory.
    ///
    /// The directory does not need to exist; readers treat absence as
    /// empty state.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The state root itself.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The config subdirectory holding entity directories and documents.
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(CONFIG_DIR)
    }

    /// Directory of rig files (one repository-URL line per file).
    pub fn rigs_dir(&self) -> PathBuf {
        self.config_dir().join("rigs")
    }

    /// Directory of polecat (worker) state files.
    pub fn polecats_dir(&self) -> PathBuf {
        self.config_dir().join("polecats")
    }

    /// Directory of dog (watchdog) state files.
    pub fn dogs_dir(&self) -> PathBuf {
        self.config_dir().join("dogs")
    }

    /// Directory of crew member state files.
    pub fn crew_dir(&self) -> PathBuf {
        self.config_dir().join("crew")
    }

    /// Directory of merge-queue entry files.
    pub fn merge_queue_dir(&self) -> PathBuf {
        self.config_dir().join("merge-queue")
    }

    /// Directory of molecule (task definition) files.
    pub fn molecules_dir(&self) -> PathBuf {
        self.root.join("molecules")
    }

    /// The orchestrator's append-only log file.
    pub fn log_file(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    /// The daemon pid file.
    pub fn daemon_pid_file(&self) -> PathBuf {
        self.config_dir().join("daemon.pid")
    }

    /// The deacon heartbeat document.
    pub fn heartbeat_file(&self) -> PathBuf {
        self.config_dir().join("deacon-heartbeat.json")
    }

    /// The escalation policy document.
    pub fn escalation_file(&self) -> PathBuf {
        self.config_dir().join("escalation.json")
    }
}

/// Default state root: `~/wheelhouse`, falling back to `./wheelhouse`
/// when the home directory cannot be determined.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wheelhouse")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_root() {
        let layout = StateLayout::new("/tmp/town");
        assert_eq!(layout.config_dir(), PathBuf::from("/tmp/town/.wheelhouse"));
        assert_eq!(
            layout.rigs_dir(),
            PathBuf::from("/tmp/town/.wheelhouse/rigs")
        );
        assert_eq!(
            layout.merge_queue_dir(),
            PathBuf::from("/tmp/town/.wheelhouse/merge-queue")
        );
        assert_eq!(layout.molecules_dir(), PathBuf::from("/tmp/town/molecules"));
        assert_eq!(layout.log_file(), PathBuf::from("/tmp/town/wheelhouse.log"));
        assert_eq!(
            layout.heartbeat_file(),
            PathBuf::from("/tmp/town/.wheelhouse/deacon-heartbeat.json")
        );
    }

    #[test]
    fn test_default_root_is_home_relative() {
        let root = default_root();
        assert!(root.ends_with("wheelhouse"));
    }
}
