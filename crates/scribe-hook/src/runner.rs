//! Orchestration of one hook invocation.
//!
//! Locate → load offsets → read span → summarize → sink → commit offset.
//! The offset for a span is committed only after its turn record has been
//! appended: a crash in between re-reads the span next time and appends a
//! duplicate record, but never loses events. Categories that are expected
//! in normal operation (bad payload, unknown session, transcript not yet
//! flushed, nothing new) are diagnosed and reported as a [`RunOutcome`];
//! only write failures surface as errors, and the binary downgrades those
//! to diagnostics too.

use anyhow::Context;
use tracing::debug;

use scribe_core::clock::utc_timestamp;
use scribe_core::{DiagnosticsLog, ScribeConfig};
use scribe_events::record::{LogSpan, SessionInfo, TurnInfo};
use scribe_events::{summarize_turn, TurnRecord};
use scribe_store::{locate_transcript, read_new_events, RecordSink};

use crate::notification::TurnNotification;

/// How an invocation ended. Every variant maps to exit status 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The notification argument was not valid JSON.
    InvalidNotification,
    /// The notification carried no session identifier.
    MissingSessionId,
    /// No transcript file could be found for the session.
    TranscriptNotFound,
    /// Nothing was appended since the last invocation; offset normalized.
    NoNewEvents,
    /// A turn record was appended and the offset committed.
    Recorded,
}

/// Run one invocation against the given configuration.
///
/// Returns `Err` only for write failures (offset store or sinks); all other
/// failure modes are recovered locally, recorded to the diagnostics log,
/// and reported through the outcome.
pub fn run(raw_notification: &str, config: &ScribeConfig) -> anyhow::Result<RunOutcome> {
    let diagnostics = DiagnosticsLog::new(config.error_log_path());

    let notification = match TurnNotification::parse(raw_notification) {
        Ok(notification) => notification,
        Err(err) => {
            diagnostics.record(&format!("invalid notification payload: {err}"));
            return Ok(RunOutcome::InvalidNotification);
        }
    };
    let Some(session_id) = notification.thread_id.clone() else {
        diagnostics.record("notification missing thread-id");
        return Ok(RunOutcome::MissingSessionId);
    };

    let state_path = config.state_path();
    let mut state = scribe_store::state::load_state(&state_path, &diagnostics);

    let Some(transcript) = locate_transcript(&config.sessions_dir, &session_id, &mut state)
    else {
        diagnostics.record(&format!(
            "unable to locate session transcript for {session_id}"
        ));
        return Ok(RunOutcome::TranscriptNotFound);
    };

    let from_offset = state.offset_for(&session_id);
    let (new_offset, events) = read_new_events(&transcript, from_offset, &diagnostics)
        .with_context(|| format!("tailing transcript for {session_id}"))?;

    if events.is_empty() {
        // Still normalize the offset past blank or malformed bytes.
        state.set(&session_id, transcript, new_offset);
        scribe_store::state::save_state(&state_path, &state)
            .context("saving offset state")?;
        debug!(session_id = %session_id, offset = new_offset, "no new events");
        return Ok(RunOutcome::NoNewEvents);
    }

    let summary = summarize_turn(&events);
    let record = TurnRecord::assemble(
        utc_timestamp(),
        SessionInfo {
            id: session_id.clone(),
            cwd: notification.cwd,
            transcript_path: transcript.clone(),
        },
        TurnInfo {
            id: notification.turn_id,
            input_messages: notification.input_messages,
            last_assistant_message: notification.last_assistant_message,
            log_span: LogSpan {
                start: from_offset,
                end: new_offset,
            },
        },
        summary,
    );

    let sink = RecordSink::new(config);
    sink.append(&session_id, &record)
        .context("appending turn record")?;

    // Committed after the append: loss-safe, duplication-possible.
    state.set(&session_id, transcript, new_offset);
    scribe_store::state::save_state(&state_path, &state).context("saving offset state")?;

    debug!(
        session_id = %session_id,
        span_start = from_offset,
        span_end = new_offset,
        events = record.telemetry.event_count,
        "turn recorded"
    );
    Ok(RunOutcome::Recorded)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
