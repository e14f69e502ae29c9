//! The [`TurnRecord`]: the write-once unit appended to the audit logs.
//!
//! One record is assembled per invocation from the notification metadata,
//! the byte span that was read, and the [`TurnSummary`] reconstructed from
//! it. Records are serialized as one JSON line each and never mutated after
//! being appended to a sink.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::summarize::{TimelineEntry, ToolCallEntry, TurnSummary};

/// Session identity, as known at invocation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Session identifier from the notification.
    pub id: String,
    /// Working directory the agent ran in, when reported.
    pub cwd: Option<String>,
    /// Transcript file the span was read from.
    pub transcript_path: PathBuf,
}

/// Byte span of the transcript covered by one record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSpan {
    /// Offset of the first byte read.
    pub start: u64,
    /// Offset one past the last byte read.
    pub end: u64,
}

/// Turn metadata carried over from the notification payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnInfo {
    /// Turn identifier, when the runtime provided one.
    pub id: Option<String>,
    /// Input messages as reported by the runtime, verbatim.
    pub input_messages: Vec<Value>,
    /// The runtime's view of the final assistant message.
    pub last_assistant_message: Option<String>,
    /// Transcript byte span this record covers.
    pub log_span: LogSpan,
}

/// Message transcripts grouped by role and classification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    /// User message texts.
    pub user: Vec<String>,
    /// Assistant message texts.
    pub assistant: Vec<String>,
    /// Free-form reasoning summaries.
    pub assistant_reasoning: Vec<String>,
    /// Plan/checklist updates.
    pub assistant_plan_updates: Vec<String>,
}

/// Telemetry captured from the span.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// `token_count` blocks, verbatim.
    pub token_counts: Vec<Value>,
    /// `approval_request` payloads, verbatim.
    pub approvals: Vec<Value>,
    /// Total events in the span, including ignored kinds.
    pub event_count: usize,
}

/// One audit record: everything that happened in one turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// When this record was assembled (RFC 3339, UTC).
    pub timestamp: String,
    /// Session identity.
    pub session: SessionInfo,
    /// Turn metadata and byte span.
    pub turn: TurnInfo,
    /// Message transcripts by role.
    pub messages: MessageLog,
    /// Tool invocations with correlated outputs.
    pub assistant_tool_calls: Vec<ToolCallEntry>,
    /// Token counts, approvals, and the event count.
    pub telemetry: Telemetry,
    /// Cross-array chronological order.
    pub timeline: Vec<TimelineEntry>,
}

impl TurnRecord {
    /// Assemble a record from notification metadata and a fold result.
    #[must_use]
    pub fn assemble(
        timestamp: String,
        session: SessionInfo,
        turn: TurnInfo,
        summary: TurnSummary,
    ) -> Self {
        Self {
            timestamp,
            session,
            turn,
            messages: MessageLog {
                user: summary.user_messages,
                assistant: summary.assistant_messages,
                assistant_reasoning: summary.assistant_reasoning,
                assistant_plan_updates: summary.assistant_plan_updates,
            },
            assistant_tool_calls: summary.tool_calls,
            telemetry: Telemetry {
                token_counts: summary.token_counts,
                approvals: summary.approvals,
                event_count: summary.event_count,
            },
            timeline: summary.timeline,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::summarize_turn;
    use serde_json::json;

    fn sample_record() -> TurnRecord {
        let events: Vec<crate::TranscriptEvent> = [
            r#"{"type":"response_item","payload":{"type":"message","role":"user","content":[{"text":"hi"}]}}"#,
            r#"{"type":"response_item","payload":{"type":"message","role":"assistant","content":[{"text":"hello"}]}}"#,
        ]
        .iter()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

        TurnRecord::assemble(
            "2025-06-01T10:00:00+00:00".to_string(),
            SessionInfo {
                id: "sess-1".to_string(),
                cwd: Some("/work".to_string()),
                transcript_path: PathBuf::from("/sessions/rollout-sess-1.jsonl"),
            },
            TurnInfo {
                id: Some("turn-9".to_string()),
                input_messages: vec![json!("hi")],
                last_assistant_message: Some("hello".to_string()),
                log_span: LogSpan { start: 0, end: 211 },
            },
            summarize_turn(&events),
        )
    }

    #[test]
    fn assemble_distributes_summary_fields() {
        let record = sample_record();
        assert_eq!(record.messages.user, vec!["hi".to_string()]);
        assert_eq!(record.messages.assistant, vec!["hello".to_string()]);
        assert_eq!(record.telemetry.event_count, 2);
        assert_eq!(record.timeline.len(), 2);
        assert!(record.assistant_tool_calls.is_empty());
    }

    #[test]
    fn record_wire_format() {
        let value = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(value["session"]["id"], "sess-1");
        assert_eq!(value["session"]["transcript_path"], "/sessions/rollout-sess-1.jsonl");
        assert_eq!(value["turn"]["log_span"], json!({"start": 0, "end": 211}));
        assert_eq!(value["messages"]["user"], json!(["hi"]));
        assert_eq!(
            value["timeline"],
            json!([
                {"event": "user_message", "index": 0},
                {"event": "assistant_message", "index": 0}
            ])
        );
    }

    #[test]
    fn record_roundtrips_through_json() {
        let record = sample_record();
        let line = serde_json::to_string(&record).unwrap();
        let back: TurnRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
