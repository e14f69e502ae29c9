//! Filesystem helpers shared by the offset store and the record sinks.
//!
//! All log files are append-only and all directories are created on demand.
//! The only replace-in-place write is [`atomic_write`], which stages the new
//! contents in a sibling temp file and renames it over the target so a crash
//! mid-write never leaves a half-written file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::errors::{Result, ScribeError};

/// Create a directory (and any missing ancestors).
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| ScribeError::io("creating directory", path, source))
}

/// Create the parent directory of `path`, if it has one.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(())
}

/// Write `contents` to `path` via a sibling temp file and an atomic rename.
///
/// The temp file lives in the same directory as `path`; a rename across
/// filesystems would not be atomic.
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)
        .map_err(|source| ScribeError::io("writing temp file", &tmp_path, source))?;
    fs::rename(&tmp_path, path).map_err(|source| ScribeError::io("replacing file", path, source))
}

/// Append one line (plus a trailing newline) to `path`, creating parent
/// directories and the file itself on demand.
pub fn append_line(path: &Path, line: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ScribeError::io("opening log for append", path, source))?;
    file.write_all(line.as_bytes())
        .and_then(|()| file.write_all(b"\n"))
        .and_then(|()| file.flush())
        .map_err(|source| ScribeError::io("appending to log", path, source))
}

/// Map a free-form identifier to a filename-safe string.
///
/// ASCII alphanumerics and `-_.` pass through; every other character
/// becomes `_`. The mapping is deterministic so repeated invocations for the
/// same session land in the same file.
#[must_use]
pub fn sanitize_filename(value: &str) -> String {
    value
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
