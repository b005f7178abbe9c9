//! Escalation policy document.

use serde_json::Value;

use crate::layout::StateLayout;
use crate::Result;

/// Read the escalation policy, if one is configured.
///
/// Returns `Ok(None)` when the file is absent: "no policy" is distinct
/// from an empty policy, and callers must be able to tell them apart.
/// A file that exists but is not valid JSON is surfaced as a decode
/// error: a malformed policy is an operational bug, not an absence.
pub fn get_escalation(layout: &StateLayout) -> Result<Option<Value>> {
    let content = match std::fs::read_to_string(layout.escalation_file()) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(serde_json::from_str(&content)?))
}
