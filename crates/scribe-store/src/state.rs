//! The offset store: durable resume state for the tailer.
//!
//! One JSON document maps each session id to the transcript path last used
//! for it and the byte offset already processed:
//!
//! ```json
//! {"sessions": {"sess-1": {"path": "/...", "offset": 4096}}}
//! ```
//!
//! Saves go through a sibling temp file and an atomic rename, so a crash
//! mid-write never leaves a half-written store. Loads are fail-open: a
//! corrupt store is logged and replaced with an empty state. The cost is
//! redundant re-processing of already-summarized bytes, which duplicates
//! their audit records; no dedup pass compensates for that.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use scribe_core::errors::Result;
use scribe_core::fsutil::atomic_write;
use scribe_core::DiagnosticsLog;

/// Resume state for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOffset {
    /// Transcript path the offset refers to.
    pub path: PathBuf,
    /// Bytes of the transcript already processed.
    pub offset: u64,
}

/// The full offset store contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetState {
    /// Per-session resume records, keyed by session id.
    #[serde(default)]
    pub sessions: BTreeMap<String, SessionOffset>,
}

impl OffsetState {
    /// Byte offset on record for a session, defaulting to 0.
    #[must_use]
    pub fn offset_for(&self, session_id: &str) -> u64 {
        self.sessions.get(session_id).map_or(0, |entry| entry.offset)
    }

    /// Record the transcript path and offset for a session.
    pub fn set(&mut self, session_id: &str, path: PathBuf, offset: u64) {
        let _ = self
            .sessions
            .insert(session_id.to_string(), SessionOffset { path, offset });
    }
}

/// Load the offset store, returning an empty state when the file is missing
/// or unreadable. Corruption is recorded to the diagnostics log.
#[must_use]
pub fn load_state(path: &Path, diagnostics: &DiagnosticsLog) -> OffsetState {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return OffsetState::default();
        }
        Err(err) => {
            diagnostics.record(&format!("failed to read offset state: {err}"));
            return OffsetState::default();
        }
    };
    match serde_json::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            diagnostics.record(&format!("offset state is corrupted, recreating: {err}"));
            OffsetState::default()
        }
    }
}

/// Persist the offset store with an atomic replace.
pub fn save_state(path: &Path, state: &OffsetState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    atomic_write(path, &json)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostics(dir: &Path) -> DiagnosticsLog {
        DiagnosticsLog::new(dir.join("errors.log"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let state = load_state(&dir.path().join("state.json"), &diagnostics(dir.path()));
        assert!(state.sessions.is_empty());
        // A missing store is normal, not a diagnostic.
        assert!(!dir.path().join("errors.log").exists());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = OffsetState::default();
        state.set("sess-1", PathBuf::from("/s/rollout-sess-1.jsonl"), 4096);
        save_state(&path, &state).unwrap();

        let loaded = load_state(&path, &diagnostics(dir.path()));
        assert_eq!(loaded, state);
        assert_eq!(loaded.offset_for("sess-1"), 4096);
    }

    #[test]
    fn corrupt_file_loads_empty_and_logs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let state = load_state(&path, &diagnostics(dir.path()));
        assert!(state.sessions.is_empty());

        let log = std::fs::read_to_string(dir.path().join("errors.log")).unwrap();
        assert!(log.contains("offset state is corrupted"));
    }

    #[test]
    fn save_is_pretty_printed_with_sorted_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut state = OffsetState::default();
        state.set("zeta", PathBuf::from("/z.jsonl"), 1);
        state.set("alpha", PathBuf::from("/a.jsonl"), 2);
        save_state(&path, &state).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains('\n'), "expected pretty output");
        let alpha = contents.find("alpha").unwrap();
        let zeta = contents.find("zeta").unwrap();
        assert!(alpha < zeta, "keys should serialize sorted");
    }

    #[test]
    fn offset_for_unknown_session_is_zero() {
        assert_eq!(OffsetState::default().offset_for("nope"), 0);
    }

    #[test]
    fn set_overwrites_existing_entry() {
        let mut state = OffsetState::default();
        state.set("s", PathBuf::from("/one.jsonl"), 10);
        state.set("s", PathBuf::from("/one.jsonl"), 25);
        assert_eq!(state.offset_for("s"), 25);
        assert_eq!(state.sessions.len(), 1);
    }
}
