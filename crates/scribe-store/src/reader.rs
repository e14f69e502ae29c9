//! Transcript reader: one-shot byte-range tail.
//!
//! Reads `[from_offset, EOF)` of a transcript and splits it into events.
//! This is a poll, not a follow: the range is bounded by the file size at
//! open time. Malformed lines are recorded to the diagnostics log and
//! skipped; they neither abort the read nor roll the offset back, so the
//! same bad bytes are never re-reported on the next invocation.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use scribe_core::errors::{Result, ScribeError};
use scribe_core::DiagnosticsLog;
use scribe_events::TranscriptEvent;

/// Longest snippet of a malformed line quoted in the diagnostics log.
const SNIPPET_CHARS: usize = 120;

/// Read all events appended since `from_offset`.
///
/// Returns the new offset (`from_offset + bytes_read`) and the decoded
/// events. A transcript deleted between locate and read yields the original
/// offset and no events; other I/O failures propagate.
pub fn read_new_events(
    path: &Path,
    from_offset: u64,
    diagnostics: &DiagnosticsLog,
) -> Result<(u64, Vec<TranscriptEvent>)> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok((from_offset, Vec::new()));
        }
        Err(err) => return Err(ScribeError::io("opening transcript", path, err)),
    };
    let _ = file
        .seek(SeekFrom::Start(from_offset))
        .map_err(|err| ScribeError::io("seeking transcript", path, err))?;

    let mut chunk = Vec::new();
    let _ = file
        .read_to_end(&mut chunk)
        .map_err(|err| ScribeError::io("reading transcript", path, err))?;
    if chunk.is_empty() {
        return Ok((from_offset, Vec::new()));
    }
    let new_offset = from_offset + chunk.len() as u64;

    let text = String::from_utf8_lossy(&chunk);
    let mut events = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<TranscriptEvent>(line) {
            Ok(event) => events.push(event),
            Err(err) => diagnostics.record(&format!(
                "failed to parse transcript line: {err}: {}",
                snippet(line)
            )),
        }
    }
    Ok((new_offset, events))
}

/// First [`SNIPPET_CHARS`] characters of a line, for diagnostics.
fn snippet(line: &str) -> String {
    line.chars().take(SNIPPET_CHARS).collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
