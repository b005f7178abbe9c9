//! Common test utilities for wheelhouse integration tests.
//!
//! Provides `TestRoot`, an isolated orchestrator state root laid out the
//! way the daemon would create it, so tests never touch a real
//! `~/wheelhouse` and can run in parallel.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub use tempfile::TempDir;
use wheelhouse::layout::StateLayout;

/// An isolated orchestrator state root on disk.
pub struct TestRoot {
    dir: TempDir,
}

impl TestRoot {
    /// Create a state root with the standard directory skeleton.
    pub fn new() -> Self {
        let root = Self {
            dir: TempDir::new().unwrap(),
        };
        for sub in ["rigs", "polecats", "dogs", "crew", "merge-queue"] {
            fs::create_dir_all(root.config_dir().join(sub)).unwrap();
        }
        fs::create_dir_all(root.path().join("molecules")).unwrap();
        root
    }

    /// Create a completely empty state root (no skeleton at all).
    pub fn bare() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// The root path itself.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A layout rooted here.
    pub fn layout(&self) -> StateLayout {
        StateLayout::new(self.path())
    }

    /// The config subdirectory.
    pub fn config_dir(&self) -> PathBuf {
        self.path().join(".wheelhouse")
    }

    /// Write a rig file (single URL line).
    pub fn write_rig(&self, name: &str, url: &str) {
        fs::write(self.config_dir().join("rigs").join(name), format!("{}\n", url)).unwrap();
    }

    /// Write a polecat state file.
    pub fn write_polecat(&self, name: &str, content: &str) {
        fs::write(self.config_dir().join("polecats").join(name), content).unwrap();
    }

    /// Write a dog state file.
    pub fn write_dog(&self, name: &str, content: &str) {
        fs::write(self.config_dir().join("dogs").join(name), content).unwrap();
    }

    /// Write a crew state file.
    pub fn write_crew(&self, name: &str, content: &str) {
        fs::write(self.config_dir().join("crew").join(name), content).unwrap();
    }

    /// Write a merge-queue entry file.
    pub fn write_merge_entry(&self, name: &str, content: &str) {
        fs::write(self.config_dir().join("merge-queue").join(name), content).unwrap();
    }

    /// Write a molecule file.
    pub fn write_molecule(&self, file: &str, content: &str) {
        fs::write(self.path().join("molecules").join(file), content).unwrap();
    }

    /// Write the orchestrator log.
    pub fn write_log(&self, content: &str) {
        fs::write(self.path().join("wheelhouse.log"), content).unwrap();
    }

    /// Write the daemon pid file.
    pub fn write_daemon_pid(&self, pid: &str) {
        fs::write(self.config_dir().join("daemon.pid"), pid).unwrap();
    }

    /// Write the deacon heartbeat document.
    pub fn write_heartbeat(&self, content: &str) {
        fs::write(self.config_dir().join("deacon-heartbeat.json"), content).unwrap();
    }

    /// Write the escalation policy document.
    pub fn write_escalation(&self, content: &str) {
        fs::write(self.config_dir().join("escalation.json"), content).unwrap();
    }
}

impl Default for TestRoot {
    fn default() -> Self {
        Self::new()
    }
}
