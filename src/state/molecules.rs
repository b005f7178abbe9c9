//! Molecule (task definition) discovery.

use std::path::Path;

use crate::layout::StateLayout;
use crate::state::model::Molecule;

/// List the molecule files available for dispatch.
///
/// A molecule's display name comes from the first `name:` line of its
/// file (whitespace-insensitive), falling back to the file stem when no
/// such line exists. Missing directory yields an empty list.
pub fn get_molecules(layout: &StateLayout) -> Vec<Molecule> {
    let dir = layout.molecules_dir();
    let entries = match std::fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut files: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect();
    files.sort();

    files
        .into_iter()
        .map(|file| {
            let name = display_name(&dir.join(&file)).unwrap_or_else(|| stem(&file));
            Molecule { name, file }
        })
        .collect()
}

/// Extract the `name:` line from a molecule file, if any.
fn display_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    content.lines().find_map(|line| {
        let trimmed = line.trim_start();
        trimmed
            .strip_prefix("name:")
            .map(|rest| rest.trim().to_string())
            .filter(|name| !name.is_empty())
    })
}

/// File name without its extension.
fn stem(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
        .to_string()
}
