//! Point-in-time status aggregation.
//!
//! One snapshot is one coherent pass over the filesystem, not a
//! transactional cut across the orchestrator's concurrent writers. Every
//! read endpoint derives its response from a fresh snapshot (or the
//! relevant slice of one); there is no caching layer, by design.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::layout::StateLayout;
use crate::state::{
    get_agents, get_crew, get_dogs, get_merge_queue, get_polecats, get_rigs, AgentsStatus,
    CrewMember, Dog, LivenessPolicy, MergeEntry, Polecat, Rig,
};
use crate::Result;

/// The composed status view served by every read endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Wall-clock generation time (freshness indicator, not a
    /// consistency token)
    pub timestamp: DateTime<Utc>,

    /// All rigs
    pub rigs: Vec<Rig>,

    /// All polecats (workers)
    pub polecats: Vec<Polecat>,

    /// All dogs (watchdogs)
    pub dogs: Vec<Dog>,

    /// All crew members
    pub crew: Vec<CrewMember>,

    /// All merge-queue entries
    pub merge_queue: Vec<MergeEntry>,

    /// Daemon and agent liveness
    pub agents: AgentsStatus,
}

/// Compose a fresh snapshot from the state root.
///
/// Pure composition of the individual readers: no caching, no
/// cross-entity joins (a polecat's RIG field stays a string name). The
/// only failure mode is a malformed heartbeat document, which is
/// surfaced rather than masked.
pub fn gather(layout: &StateLayout, policy: &LivenessPolicy) -> Result<StatusSnapshot> {
    Ok(StatusSnapshot {
        timestamp: Utc::now(),
        rigs: get_rigs(layout),
        polecats: get_polecats(layout),
        dogs: get_dogs(layout),
        crew: get_crew(layout),
        merge_queue: get_merge_queue(layout),
        agents: get_agents(layout, policy)?,
    })
}
