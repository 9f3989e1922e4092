//! Source-file discovery
//!
//! Enumerates regular files under the scan root, pruning a fixed set of
//! conventional non-source directories before anything is opened. Output is
//! sorted by path so discovery order is deterministic.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::languages::SourceLang;
use crate::resolve::normalize;

/// Directories pruned at any depth. Structural, not content-based.
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".next",
    "dist",
    "build",
    "out",
    "target",
    "__pycache__",
    ".venv",
    "venv",
    ".cache",
    "coverage",
    "vendor",
];

/// One discovered source file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Absolute slash-normalized path; becomes the node id.
    pub id: String,
    pub path: PathBuf,
    pub lang: SourceLang,
}

fn is_excluded_dir(path: &Path, extra: &[String]) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |name| {
            EXCLUDED_DIRS.contains(&name) || extra.iter().any(|e| e == name)
        })
}

/// Enumerate eligible source files under `root` with the fixed exclusion
/// set only.
pub fn discover(root: &Path) -> Vec<SourceFile> {
    discover_with(root, &[])
}

/// Enumerate eligible source files under `root`.
///
/// Files whose extension matches neither language are ignored. Directories
/// that disappear mid-walk are skipped with a warning and the walk
/// continues.
pub fn discover_with(root: &Path, extra_excluded: &[String]) -> Vec<SourceFile> {
    let extra = extra_excluded.to_vec();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(move |entry| {
            let is_dir = entry.file_type().map_or(false, |t| t.is_dir());
            !(is_dir && is_excluded_dir(entry.path(), &extra))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().map_or(false, |t| t.is_file()) {
            continue;
        }
        let path = entry.path().to_path_buf();
        let Some(lang) = SourceLang::from_path(&path) else {
            continue;
        };
        files.push(SourceFile {
            id: normalize(&path),
            path,
            lang,
        });
    }

    files.sort_by(|a, b| a.id.cmp(&b.id));
    files
}
