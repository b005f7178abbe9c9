//! Entity readers over the orchestrator's state directories.
//!
//! Five directories share one shape: a flat set of files, one entity per
//! file, the file name doubling as the entity name. A single walker lists
//! and parses them; per-entity constructors lift the conventional fields.

use std::collections::BTreeMap;
use std::path::Path;

use crate::layout::StateLayout;
use crate::state::model::{CrewMember, Dog, MergeEntry, Polecat, Rig};
use crate::state::record::parse_record;

/// List a state directory and parse each entry as a `KEY=value` record.
///
/// Entries are sorted by name so responses are deterministic regardless
/// of raw directory order. Dot-files, subdirectories, and entries that
/// vanish between listing and reading are skipped; an entry that reads
/// but parses to nothing is still included (partial data beats a dropped
/// entity). A missing directory yields an empty list.
fn read_state_dir(dir: &Path) -> Vec<(String, BTreeMap<String, String>)> {
    list_entries(dir)
        .into_iter()
        .filter_map(|name| {
            let content = std::fs::read_to_string(dir.join(&name)).ok()?;
            Some((name, parse_record(&content)))
        })
        .collect()
}

/// List the file names in a state directory, sorted, dot-files excluded.
fn list_entries(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    names
}

/// Read all rigs.
///
/// A rig file holds a single repository-URL line; `owner_repo` is derived
/// from its last two path segments.
pub fn get_rigs(layout: &StateLayout) -> Vec<Rig> {
    let dir = layout.rigs_dir();
    list_entries(&dir)
        .into_iter()
        .filter_map(|name| {
            let content = std::fs::read_to_string(dir.join(&name)).ok()?;
            let url = content
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .unwrap_or_default()
                .to_string();
            let owner_repo = derive_owner_repo(&url);
            Some(Rig {
                name,
                url,
                owner_repo,
            })
        })
        .collect()
}

/// Derive `owner/repo` from a repository URL.
///
/// Strips the scheme prefix and joins the last two `/`-separated
/// segments; returns an empty string when fewer than two remain.
fn derive_owner_repo(url: &str) -> String {
    let rest = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let segments: Vec<&str> = rest
        .trim_end_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    match segments.as_slice() {
        [.., owner, repo] => format!("{}/{}", owner, repo),
        _ => String::new(),
    }
}

/// Read all polecats (worker processes).
pub fn get_polecats(layout: &StateLayout) -> Vec<Polecat> {
    read_state_dir(&layout.polecats_dir())
        .into_iter()
        .map(|(name, record)| Polecat::from_record(name, record))
        .collect()
}

/// Read all dogs (watchdog processes).
pub fn get_dogs(layout: &StateLayout) -> Vec<Dog> {
    read_state_dir(&layout.dogs_dir())
        .into_iter()
        .map(|(name, record)| Dog::from_record(name, record))
        .collect()
}

/// Read all crew members.
pub fn get_crew(layout: &StateLayout) -> Vec<CrewMember> {
    read_state_dir(&layout.crew_dir())
        .into_iter()
        .map(|(name, record)| CrewMember::from_record(name, record))
        .collect()
}

/// Read all merge-queue entries.
pub fn get_merge_queue(layout: &StateLayout) -> Vec<MergeEntry> {
    read_state_dir(&layout.merge_queue_dir())
        .into_iter()
        .map(|(name, record)| MergeEntry::from_record(name, record))
        .collect()
}
