//! Scan error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning a source tree.
///
/// Only `InvalidPath` is fatal and surfaces to the caller. `FileRead` and
/// `Parse` are per-file: the scan absorbs them into degraded analysis data
/// and continues with the remaining files.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("invalid path: {path} is not a readable directory")]
    InvalidPath { path: PathBuf },

    #[error("failed to read {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse { path: PathBuf },
}

impl ScanError {
    /// Whether this error aborts the whole scan.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::InvalidPath { .. })
    }
}
