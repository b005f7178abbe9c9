//! Daemon and agent liveness derived from the pid file and the deacon
//! heartbeat document.
//!
//! The daemon is "running" when the pid recorded in `daemon.pid` answers
//! a signal-0 probe. The deacon is "running" when its heartbeat timestamp
//! is younger than the configured staleness window; any sub-agents the
//! heartbeat enumerates are judged the same way. Missing files are a
//! normal negative result, never an error. A heartbeat file that exists
//! but fails to parse as JSON is an upstream bug and is surfaced as a
//! decode error.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::layout::StateLayout;
use crate::Result;

/// Liveness policy knobs.
///
/// The heartbeat staleness window is deliberately configuration, not a
/// constant: how long a quiet deacon stays "running" depends on how the
/// orchestrator is scheduled on a given host.
#[derive(Debug, Clone, Copy)]
pub struct LivenessPolicy {
    /// Heartbeats older than this are considered stale.
    pub heartbeat_stale: Duration,
}

impl Default for LivenessPolicy {
    fn default() -> Self {
        Self {
            heartbeat_stale: Duration::seconds(120),
        }
    }
}

impl LivenessPolicy {
    /// Policy with a staleness window of the given number of seconds.
    pub fn with_stale_secs(secs: i64) -> Self {
        Self {
            heartbeat_stale: Duration::seconds(secs),
        }
    }
}

/// Daemon process status from the pid file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonStatus {
    /// Whether the recorded pid answers a liveness probe
    pub running: bool,

    /// Pid recorded in the pid file, if parseable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pid: Option<i32>,
}

/// Deacon status from the heartbeat document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeaconStatus {
    /// Whether the last heartbeat is within the staleness window
    pub running: bool,

    /// Raw heartbeat timestamp as written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<String>,

    /// Heartbeat age in seconds at read time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_secs: Option<i64>,

    /// Remaining heartbeat document fields, passed through verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DeaconStatus {
    fn not_running() -> Self {
        Self {
            running: false,
            last_heartbeat: None,
            age_secs: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Health of a named sub-agent enumerated by the heartbeat document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentHealth {
    /// Whether this agent's heartbeat (or the document's) is fresh
    pub running: bool,

    /// The agent's own heartbeat timestamp, if it reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_heartbeat: Option<String>,

    /// Remaining agent fields, passed through verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Combined liveness view served under `agents` in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentsStatus {
    /// Daemon process status
    pub daemon: DaemonStatus,

    /// Deacon heartbeat status
    pub deacon: DeaconStatus,

    /// Named sub-agents from the heartbeat document
    #[serde(flatten)]
    pub agents: BTreeMap<String, AgentHealth>,
}

/// Read daemon and agent liveness.
pub fn get_agents(layout: &StateLayout, policy: &LivenessPolicy) -> Result<AgentsStatus> {
    get_agents_at(layout, policy, Utc::now())
}

/// Read liveness against an explicit "now" (injectable for tests).
pub fn get_agents_at(
    layout: &StateLayout,
    policy: &LivenessPolicy,
    now: DateTime<Utc>,
) -> Result<AgentsStatus> {
    let daemon = read_daemon(layout);
    let (deacon, agents) = read_heartbeat(layout, policy, now)?;
    Ok(AgentsStatus {
        daemon,
        deacon,
        agents,
    })
}

fn read_daemon(layout: &StateLayout) -> DaemonStatus {
    let pid = std::fs::read_to_string(layout.daemon_pid_file())
        .ok()
        .and_then(|content| content.trim().parse::<i32>().ok());

    DaemonStatus {
        running: pid.map(pid_alive).unwrap_or(false),
        pid,
    }
}

/// Probe a pid with signal 0. EPERM means the process exists but belongs
/// to another user, which still counts as running.
#[cfg(unix)]
fn pid_alive(pid: i32) -> bool {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    match kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
fn pid_alive(_pid: i32) -> bool {
    false
}

fn read_heartbeat(
    layout: &StateLayout,
    policy: &LivenessPolicy,
    now: DateTime<Utc>,
) -> Result<(DeaconStatus, BTreeMap<String, AgentHealth>)> {
    let content = match std::fs::read_to_string(layout.heartbeat_file()) {
        Ok(content) => content,
        Err(_) => return Ok((DeaconStatus::not_running(), BTreeMap::new())),
    };

    // A present-but-malformed heartbeat is an orchestrator bug worth
    // surfacing, unlike a missing one.
    let doc: Value = serde_json::from_str(&content)?;

    let mut fields = match doc {
        Value::Object(map) => map,
        other => {
            let mut extra = BTreeMap::new();
            extra.insert("value".to_string(), other);
            return Ok((
                DeaconStatus {
                    running: false,
                    last_heartbeat: None,
                    age_secs: None,
                    extra,
                },
                BTreeMap::new(),
            ));
        }
    };

    let sub_agents = fields.remove("agents");
    let last_heartbeat = take_timestamp(&mut fields);
    let age_secs = last_heartbeat
        .as_deref()
        .and_then(|ts| heartbeat_age(ts, now));
    let running = age_secs
        .map(|age| age <= policy.heartbeat_stale.num_seconds())
        .unwrap_or(false);

    let deacon = DeaconStatus {
        running,
        last_heartbeat,
        age_secs,
        extra: fields.into_iter().collect(),
    };

    let agents = match sub_agents {
        Some(Value::Object(map)) => map
            .into_iter()
            .filter(|(name, _)| name != "daemon" && name != "deacon")
            .map(|(name, value)| (name, agent_health(value, deacon.running, policy, now)))
            .collect(),
        _ => BTreeMap::new(),
    };

    Ok((deacon, agents))
}

/// Pull the heartbeat timestamp out of a document, accepting either
/// `timestamp` or `last_heartbeat` as the field name.
fn take_timestamp(fields: &mut serde_json::Map<String, Value>) -> Option<String> {
    for key in ["timestamp", "last_heartbeat"] {
        if let Some(value) = fields.remove(key) {
            if let Value::String(s) = value {
                return Some(s);
            }
            // non-string timestamp: keep it visible, but unusable for age
            fields.insert(key.to_string(), value);
            return None;
        }
    }
    None
}

/// Age of an RFC 3339 timestamp in whole seconds. A timestamp from the
/// future (clock skew between writers) reads as age zero.
fn heartbeat_age(ts: &str, now: DateTime<Utc>) -> Option<i64> {
    let parsed = DateTime::parse_from_rfc3339(ts).ok()?;
    Some((now - parsed.with_timezone(&Utc)).num_seconds().max(0))
}

/// Judge one sub-agent entry. An entry with its own timestamp is judged
/// by it; otherwise it inherits the document-level freshness.
fn agent_health(
    value: Value,
    deacon_running: bool,
    policy: &LivenessPolicy,
    now: DateTime<Utc>,
) -> AgentHealth {
    match value {
        Value::Object(map) => {
            let mut fields = map;
            let last_heartbeat = take_timestamp(&mut fields);
            let running = match last_heartbeat.as_deref().and_then(|ts| heartbeat_age(ts, now)) {
                Some(age) => age <= policy.heartbeat_stale.num_seconds(),
                None => deacon_running,
            };
            AgentHealth {
                running,
                last_heartbeat,
                extra: fields.into_iter().collect(),
            }
        }
        other => {
            let mut extra = BTreeMap::new();
            extra.insert("state".to_string(), other);
            AgentHealth {
                running: deacon_running,
                last_heartbeat: None,
                extra,
            }
        }
    }
}
