//! Error types for the scribe audit hook.
//!
//! [`ScribeError`] is the primary error type returned by all fallible scribe
//! operations. Filesystem variants carry the operation and path so a single
//! diagnostics line is enough to find the failure.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while tailing a transcript or writing audit records.
#[derive(Debug, Error)]
pub enum ScribeError {
    /// Filesystem error with operation and path context.
    #[error("{op} {path}: {source}")]
    Io {
        /// What was being attempted, e.g. `"reading transcript"`.
        op: &'static str,
        /// The path involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScribeError {
    /// Create an [`ScribeError::Io`] with operation and path context.
    #[must_use]
    pub fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Convenience type alias for scribe results.
pub type Result<T> = std::result::Result<T, ScribeError>;

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
