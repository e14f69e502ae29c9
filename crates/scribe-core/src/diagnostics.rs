//! The durable diagnostics log.
//!
//! The hook must never fail its caller, so every recovered error is recorded
//! here instead of being surfaced through the exit status. One plain-text
//! line per entry: `[RFC-3339 timestamp] message`.
//!
//! Writing to the log is itself best-effort: a diagnostics write failure is
//! dropped rather than escalated, since there is nowhere left to report it.

use std::path::{Path, PathBuf};

use crate::clock::utc_timestamp;
use crate::fsutil;

/// Append-only plain-text error log.
#[derive(Clone, Debug)]
pub struct DiagnosticsLog {
    path: PathBuf,
}

impl DiagnosticsLog {
    /// Create a diagnostics log that appends to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record one diagnostic line with a timestamp prefix.
    ///
    /// The same message is also emitted as a `tracing` warning so it shows
    /// up on stderr when the hook runs with `SCRIBE_LOG` enabled.
    pub fn record(&self, message: &str) {
        tracing::warn!(target: "scribe", "{message}");
        let line = format!("[{}] {message}", utc_timestamp());
        if let Err(err) = fsutil::append_line(&self.path, &line) {
            tracing::warn!(target: "scribe", "failed to write diagnostics log: {err}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
