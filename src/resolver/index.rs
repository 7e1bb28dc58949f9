use std::path::PathBuf;

use super::{resolve, MatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// One-level enumeration of the given roots. Rebuilt per request and never
/// cached: the filesystem changes between directives. Missing roots are
/// skipped, unreadable ones logged.
pub fn build_index(roots: &[PathBuf]) -> Vec<IndexEntry> {
    let mut index = Vec::new();
    for root in roots {
        if !root.exists() {
            continue;
        }
        let entries = match std::fs::read_dir(root) {
            Ok(e) => e,
            Err(e) => {
                tracing::error!(root = %root.display(), error = %e, "failed to scan root");
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let kind = if path.is_dir() { EntryKind::Folder } else { EntryKind::File };
            index.push(IndexEntry {
                name: name.to_string(),
                path,
                kind,
            });
        }
    }
    tracing::debug!(items = index.len(), "candidate index built");
    index
}

/// Fuzzy lookup of one `kind` of entry by name.
pub fn search<'a>(
    query: &str,
    index: &'a [IndexEntry],
    kind: EntryKind,
    threshold: u8,
) -> Option<(&'a IndexEntry, MatchResult)> {
    let names = index.iter().filter(|e| e.kind == kind).map(|e| e.name.as_str());
    let m = resolve(query, names, threshold)?;
    index
        .iter()
        .find(|e| e.kind == kind && e.name == m.name)
        .map(|e| (e, m))
}

/// The user profile folders plus configured extra roots (external drives).
pub fn default_roots(extra: &[String]) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = extra.iter().map(PathBuf::from).collect();
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Desktop"));
    }
    if let Some(docs) = dirs::document_dir() {
        roots.push(docs);
    }
    if let Some(downloads) = dirs::download_dir() {
        roots.push(downloads);
    }
    roots
}
