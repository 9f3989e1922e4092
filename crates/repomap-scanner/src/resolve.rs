//! Fuzzy import-specifier resolution
//!
//! Pure functions over the known-file set gathered during the scan; the
//! resolver performs no filesystem I/O of its own.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Candidate extension order for the primary language. First match wins.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Lexically normalize a path: forward slashes, `.` and `..` resolved.
/// No filesystem access, so a dangling `..` at the root is simply dropped.
pub fn normalize(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut prefix = String::new();
    for component in path.components() {
        match component {
            Component::Prefix(p) => {
                prefix = p.as_os_str().to_string_lossy().replace('\\', "/");
            }
            Component::RootDir => {}
            Component::CurDir => {}
            Component::ParentDir => {
                parts.pop();
            }
            Component::Normal(seg) => parts.push(seg.to_string_lossy().into_owned()),
        }
    }
    format!("{}/{}", prefix, parts.join("/"))
}

fn first_known(candidates: impl IntoIterator<Item = String>, known: &HashSet<String>) -> Option<String> {
    candidates.into_iter().find(|c| known.contains(c))
}

/// Resolve a primary-language specifier relative to the importing file's
/// directory.
///
/// Only relative specifiers (`./`, `../`) are eligible; bare package names
/// denote external dependencies and never produce an edge. Candidates are
/// tried in a fixed order: the literal path, the path with each source
/// extension appended, then the path as a directory with an `index` entry
/// file in the same extension order.
pub fn resolve_relative(
    specifier: &str,
    from_dir: &Path,
    known: &HashSet<String>,
) -> Option<String> {
    if !specifier.starts_with('.') {
        return None;
    }
    let base = normalize(&from_dir.join(specifier));

    let mut candidates = vec![base.clone()];
    for ext in SOURCE_EXTENSIONS {
        candidates.push(format!("{}.{}", base, ext));
    }
    for ext in SOURCE_EXTENSIONS {
        candidates.push(format!("{}/index.{}", base, ext));
    }

    first_known(candidates, known)
}

/// Resolve a Python dotted-module specifier.
///
/// Leading dots anchor the lookup at the importing file's directory (one
/// dot) and pop one level per additional dot, mirroring package semantics.
/// Dotless module paths are tried against the importing directory first and
/// fall back to the scan root, modelling package imports whose root sits
/// above the importing file. Candidates per base: `<path>.py`, then
/// `<path>/__init__.py`.
pub fn resolve_module(
    specifier: &str,
    from_dir: &Path,
    root: &Path,
    known: &HashSet<String>,
) -> Option<String> {
    let dots = specifier.chars().take_while(|&c| c == '.').count();
    let remainder = &specifier[dots..];
    let segments: Vec<&str> = remainder.split('.').filter(|s| !s.is_empty()).collect();

    let try_base = |base_dir: &Path| -> Option<String> {
        let mut path = base_dir.to_path_buf();
        for seg in &segments {
            path.push(seg);
        }
        let base = normalize(&path);
        if base.is_empty() {
            return None;
        }
        first_known(
            [format!("{}.py", base), format!("{}/__init__.py", base)],
            known,
        )
    };

    if dots > 0 {
        let mut base_dir: PathBuf = from_dir.to_path_buf();
        for _ in 1..dots {
            base_dir.pop();
        }
        return try_base(&base_dir);
    }

    try_base(from_dir).or_else(|| try_base(root))
}
