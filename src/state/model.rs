//! Data models for orchestrator state entities.
//!
//! Source records are untyped `KEY=value` bags that carry specific fields
//! by convention, not schema. Each entity keeps the conventional fields
//! explicit and folds everything else into an overflow map so new keys
//! written by a future orchestrator survive the round trip to JSON.
//!
//! Field names serialize exactly as the orchestrator writes them
//! (uppercase keys), with the entity's `name` derived from its file name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A work rig: a repository the orchestrator operates on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rig {
    /// Directory entry name of the rig file
    pub name: String,

    /// Raw repository URL as written by the orchestrator
    pub url: String,

    /// `owner/repo` derived from the URL (empty if underivable)
    pub owner_repo: String,
}

/// A polecat: a worker process dispatched against a rig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polecat {
    /// Directory entry name of the state file
    pub name: String,

    /// Rig this worker is attached to
    #[serde(rename = "RIG", skip_serializing_if = "Option::is_none")]
    pub rig: Option<String>,

    /// Repository URL the worker is operating on
    #[serde(rename = "REPO", skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Issue number the worker is assigned
    #[serde(rename = "ISSUE", skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,

    /// Worker status as reported by the orchestrator
    #[serde(rename = "STATUS", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// A dog: a watchdog process supervising a rig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    /// Directory entry name of the state file
    pub name: String,

    /// Rig this watchdog supervises
    #[serde(rename = "RIG", skip_serializing_if = "Option::is_none")]
    pub rig: Option<String>,

    /// Watchdog status as reported by the orchestrator
    #[serde(rename = "STATUS", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// A human crew member registered with the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    /// Directory entry name of the state file
    pub name: String,

    /// Display name
    #[serde(rename = "NAME", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Rig this member works on
    #[serde(rename = "RIG", skip_serializing_if = "Option::is_none")]
    pub rig: Option<String>,

    /// Role within the crew (e.g. "reviewer")
    #[serde(rename = "ROLE", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// An entry in the merge queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeEntry {
    /// Directory entry name of the queue file
    pub name: String,

    /// Polecat that produced the change
    #[serde(rename = "POLECAT", skip_serializing_if = "Option::is_none")]
    pub polecat: Option<String>,

    /// Pull request number
    #[serde(rename = "PR", skip_serializing_if = "Option::is_none")]
    pub pr: Option<String>,

    /// Whether the merge should proceed without review ("true"/"false")
    #[serde(rename = "AUTO_MERGE", skip_serializing_if = "Option::is_none")]
    pub auto_merge: Option<String>,

    /// Unrecognized keys, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// A molecule: a task definition file available for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Molecule {
    /// Display name (from the file's `name:` line, or the file stem)
    pub name: String,

    /// File name the molecule was read from
    pub file: String,
}

impl Polecat {
    /// Build a polecat from its file name and parsed record.
    pub fn from_record(name: String, mut record: BTreeMap<String, String>) -> Self {
        Self {
            name,
            rig: record.remove("RIG"),
            repo: record.remove("REPO"),
            issue: record.remove("ISSUE"),
            status: record.remove("STATUS"),
            extra: record,
        }
    }
}

impl Dog {
    /// Build a dog from its file name and parsed record.
    pub fn from_record(name: String, mut record: BTreeMap<String, String>) -> Self {
        Self {
            name,
            rig: record.remove("RIG"),
            status: record.remove("STATUS"),
            extra: record,
        }
    }
}

impl CrewMember {
    /// Build a crew member from its file name and parsed record.
    pub fn from_record(name: String, mut record: BTreeMap<String, String>) -> Self {
        Self {
            name,
            display_name: record.remove("NAME"),
            rig: record.remove("RIG"),
            role: record.remove("ROLE"),
            extra: record,
        }
    }
}

impl MergeEntry {
    /// Build a merge-queue entry from its file name and parsed record.
    pub fn from_record(name: String, mut record: BTreeMap<String, String>) -> Self {
        Self {
            name,
            polecat: record.remove("POLECAT"),
            pr: record.remove("PR"),
            auto_merge: record.remove("AUTO_MERGE"),
            extra: record,
        }
    }
}
