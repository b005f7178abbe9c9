//! Readers for the orchestrator's on-disk state.
//!
//! The orchestrator and its workers write small flat files concurrently
//! with our reads, so every reader here is best-effort: a file read
//! mid-write parses whatever complete lines it captured, a file that
//! vanishes between listing and reading is skipped, and a missing
//! directory is an empty listing. None of these readers take locks.

pub mod agents;
pub mod escalation;
pub mod log;
pub mod model;
pub mod molecules;
pub mod record;
pub mod readers;

pub use agents::{get_agents, AgentHealth, AgentsStatus, DaemonStatus, DeaconStatus, LivenessPolicy};
pub use escalation::get_escalation;
pub use log::{tail_log, DEFAULT_LOG_LINES};
pub use model::{CrewMember, Dog, MergeEntry, Molecule, Polecat, Rig};
pub use molecules::get_molecules;
pub use readers::{get_crew, get_dogs, get_merge_queue, get_polecats, get_rigs};
pub use record::{parse_record, read_record};
