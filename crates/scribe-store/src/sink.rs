//! Record sink: durable destinations for assembled turn records.
//!
//! Each record is serialized once and appended as a single JSON line to the
//! global audit log and to the session's own log; after the global append
//! the audit log is copied into the export directory under a configured
//! filename prefix. No locking is performed across invocations: different
//! sessions write disjoint per-session files, and the host runtime
//! serializes turns within one session.

use std::path::{Path, PathBuf};

use tracing::debug;

use scribe_core::errors::{Result, ScribeError};
use scribe_core::fsutil::{append_line, ensure_dir, sanitize_filename};
use scribe_core::ScribeConfig;
use scribe_events::TurnRecord;

/// Append-only writer for the audit log, its mirror, and per-session logs.
#[derive(Clone, Debug)]
pub struct RecordSink {
    audit_log: PathBuf,
    export_dir: PathBuf,
    session_log_dir: PathBuf,
    mirror_prefix: String,
}

impl RecordSink {
    /// Build a sink from the hook configuration.
    #[must_use]
    pub fn new(config: &ScribeConfig) -> Self {
        Self {
            audit_log: config.turn_log_path(),
            export_dir: config.export_dir.clone(),
            session_log_dir: config.session_log_dir.clone(),
            mirror_prefix: config.mirror_prefix.clone(),
        }
    }

    /// Path of the global audit log.
    #[must_use]
    pub fn audit_log_path(&self) -> &Path {
        &self.audit_log
    }

    /// Per-session log path for a session id, with the id sanitized into a
    /// safe filename.
    #[must_use]
    pub fn session_log_path(&self, session_id: &str) -> PathBuf {
        self.session_log_dir
            .join(format!("{}.jsonl", sanitize_filename(session_id)))
    }

    /// Append one record to the audit log, refresh the mirror copy, and
    /// append the same line to the session's log.
    pub fn append(&self, session_id: &str, record: &TurnRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        append_line(&self.audit_log, &line)?;
        self.mirror_audit_log()?;
        append_line(&self.session_log_path(session_id), &line)?;
        debug!(session_id, "turn record appended");
        Ok(())
    }

    /// Copy the audit log into the export directory as
    /// `<prefix>_<filename>`.
    fn mirror_audit_log(&self) -> Result<()> {
        let Some(name) = self.audit_log.file_name().map(|n| n.to_string_lossy()) else {
            return Ok(());
        };
        ensure_dir(&self.export_dir)?;
        let dest = self
            .export_dir
            .join(format!("{}_{name}", self.mirror_prefix));
        let _ = std::fs::copy(&self.audit_log, &dest)
            .map_err(|err| ScribeError::io("mirroring audit log", &dest, err))?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
