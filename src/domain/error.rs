// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// File-level problems are fatal for one `load` call:
//   - Configuration   → bad mode / encoding / fraction, raised
//                       before any file is touched
//   - MalformedInput  → the file exists but cannot be decoded,
//                       parsed, or lacks its top-level shape
//   - Io              → the file exists but cannot be read
//
// A missing file is NOT an error, and a single malformed
// record inside a good file is counted and skipped instead.
//
// Reference: Rust Book §9 (Error Handling)
//            thiserror crate documentation

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("malformed input in '{}': {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("cannot read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    pub fn malformed(path: &Path, reason: impl std::fmt::Display) -> Self {
        DatasetError::MalformedInput {
            path:   path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// A document whose top-level layout does not match the
/// selected source format. The data layer attaches the path.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ShapeError(pub String);
