//! Flat `KEY=value` record parsing.
//!
//! Orchestrator state files are untyped bags of `KEY=value` lines,
//! optionally double-quoted, with `#` comments. Parsing never fails:
//! a torn write yields a record with fewer fields, not an error.

use std::collections::BTreeMap;
use std::path::Path;

/// Parse `KEY=value` record content into a key/value map.
///
/// Rules:
/// - blank lines and lines whose first non-whitespace character is `#`
///   are skipped
/// - a line without `=` is skipped
/// - the value is everything after the first `=`, with one layer of
///   matching surrounding double quotes stripped (`FOO="bar"` and
///   `FOO=bar` are equivalent)
/// - on duplicate keys the last occurrence wins
///
/// Values stay strings; callers interpret numeric or boolean semantics
/// themselves.
pub fn parse_record(content: &str) -> BTreeMap<String, String> {
    let mut record = BTreeMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            record.insert(key.to_string(), unquote(value).to_string());
        }
    }

    record
}

/// Read and parse a record file.
///
/// A missing or unreadable file yields an empty map, never an error:
/// the file may have been removed by the orchestrator between directory
/// listing and read.
pub fn read_record(path: &Path) -> BTreeMap<String, String> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_record(&content),
        Err(_) => BTreeMap::new(),
    }
}

/// Strip one layer of matching surrounding double quotes.
fn unquote(value: &str) -> &str {
    let v = value.trim();
    if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
        &v[1..v.len() - 1]
    } else {
        v
    }
}
