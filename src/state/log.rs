//! Tail of the orchestrator's append-only log.

use std::path::Path;

/// Default number of log lines returned when the caller doesn't ask for
/// a specific count.
pub const DEFAULT_LOG_LINES: usize = 10;

/// Return the last `n` lines of the log, oldest-first, trailing newlines
/// stripped.
///
/// The whole file is read and sliced in memory; the log is bounded by
/// external rotation, not by this component. A missing file or `n == 0`
/// yields an empty list.
pub fn tail_log(path: &Path, n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return Vec::new(),
    };

    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].iter().map(|line| line.to_string()).collect()
}
