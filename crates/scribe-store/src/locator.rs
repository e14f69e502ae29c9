//! Session locator: maps a session id to its transcript file.
//!
//! The offset state doubles as a path cache: when it already knows a path
//! for the session and that path still exists, no search happens. Otherwise
//! the sessions root is walked recursively for `*<session_id>.jsonl`. The
//! first match wins (session ids are expected unique within the root) and
//! is cached with offset 0.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::state::OffsetState;

/// Resolve the transcript path for a session, consulting and updating the
/// cached state. Returns `None` when no transcript can be found; the
/// session may simply not have been flushed to disk yet.
pub fn locate_transcript(
    sessions_dir: &Path,
    session_id: &str,
    state: &mut OffsetState,
) -> Option<PathBuf> {
    if let Some(entry) = state.sessions.get(session_id) {
        if entry.path.exists() {
            debug!(session_id, path = %entry.path.display(), "locator cache hit");
            return Some(entry.path.clone());
        }
    }

    let suffix = format!("{session_id}.jsonl");
    let found = WalkDir::new(sessions_dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .find(|entry| {
            entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(&suffix)
        })
        .map(walkdir::DirEntry::into_path)?;

    debug!(session_id, path = %found.display(), "transcript located by search");
    state.set(session_id, found.clone(), 0);
    Some(found)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
