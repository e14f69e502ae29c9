//! The [`TranscriptEvent`] struct: one transcript line.
//!
//! Events are stored as a flat struct with base fields at the top level and
//! a `payload` kept as opaque [`serde_json::Value`], matching the wire
//! format produced by the external writer:
//!
//! ```json
//! {"timestamp": "...", "type": "response_item", "payload": {"type": "message", ...}}
//! ```
//!
//! Typed access to the payload is opt-in via
//! [`TranscriptEvent::typed_payload()`], which dispatches on the event kind
//! and the nested `payload.type` string. Anything the dispatcher does not
//! recognize (unknown kinds, unknown payload types, payloads of the wrong
//! shape) collapses to [`EventPayload::Unknown`], which the summarizer
//! ignores. The writer is uncontrolled, so leaf fields whose shape varies
//! (`content`, `summary`, `arguments`, `output`, `info`) stay [`Value`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level event discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A model response item (message, reasoning, tool call/output).
    ResponseItem,
    /// A runtime-side event (token counts, approval requests).
    EventMsg,
    /// Any kind this hook does not understand. Ignored, but the bytes it
    /// occupies still advance the transcript offset.
    #[serde(other)]
    Unknown,
}

/// One transcript line.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEvent {
    /// Event kind discriminator.
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// ISO 8601 timestamp, when the writer provided one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Kind-specific data (opaque JSON).
    #[serde(default)]
    pub payload: Value,
}

/// A `message` payload: text content attributed to a role.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MessagePayload {
    /// Speaker role (`user`, `assistant`, ...).
    #[serde(default)]
    pub role: Option<String>,
    /// Content items; text items carry a `text` field.
    #[serde(default)]
    pub content: Value,
}

impl MessagePayload {
    /// Concatenate the non-empty `text` fields of the content items, in
    /// order, separated by newlines. Non-list content and non-text items
    /// contribute nothing.
    #[must_use]
    pub fn flattened_text(&self) -> String {
        let Some(items) = self.content.as_array() else {
            return String::new();
        };
        let chunks: Vec<&str> = items
            .iter()
            .filter_map(|item| item.get("text").and_then(Value::as_str))
            .filter(|text| !text.is_empty())
            .collect();
        chunks.join("\n")
    }
}

/// A `reasoning` payload: summarized model reasoning.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ReasoningPayload {
    /// Summary items; each object item carries a `text` field.
    #[serde(default)]
    pub summary: Value,
}

impl ReasoningPayload {
    /// Join the summary item texts with newlines. Object items without a
    /// `text` field contribute an empty string; non-object items are
    /// dropped.
    #[must_use]
    pub fn summary_text(&self) -> String {
        let Some(items) = self.summary.as_array() else {
            return String::new();
        };
        items
            .iter()
            .filter(|item| item.is_object())
            .map(|item| item.get("text").and_then(Value::as_str).unwrap_or(""))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A `function_call` payload: the start of a tool invocation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FunctionCallPayload {
    /// Correlation id shared with later outputs.
    #[serde(default)]
    pub call_id: Option<String>,
    /// Tool name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw arguments, frequently a JSON document encoded as a string.
    #[serde(default)]
    pub arguments: Value,
}

/// A `function_call_output` payload: one result of a tool invocation.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FunctionCallOutputPayload {
    /// Correlation id of the originating call.
    #[serde(default)]
    pub call_id: Option<String>,
    /// Raw output, frequently a JSON document encoded as a string.
    #[serde(default)]
    pub output: Value,
}

/// A `token_count` payload: usage telemetry from the runtime.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TokenCountPayload {
    /// Opaque usage block, captured verbatim.
    #[serde(default)]
    pub info: Value,
}

/// Typed payload for the event kinds the summarizer understands.
#[derive(Clone, Debug, PartialEq)]
pub enum EventPayload {
    /// `response_item` / `message`
    Message(MessagePayload),
    /// `response_item` / `reasoning`
    Reasoning(ReasoningPayload),
    /// `response_item` / `function_call`
    FunctionCall(FunctionCallPayload),
    /// `response_item` / `function_call_output`
    FunctionCallOutput(FunctionCallOutputPayload),
    /// `event_msg` / `token_count`
    TokenCount(TokenCountPayload),
    /// `event_msg` / `approval_request`: the whole payload, verbatim.
    ApprovalRequest(Value),
    /// Everything else.
    Unknown,
}

impl TranscriptEvent {
    /// Dispatch the opaque payload into the typed variant for this event.
    ///
    /// Unrecognized kinds and payload types, and payloads whose shape does
    /// not decode, all return [`EventPayload::Unknown`].
    #[must_use]
    pub fn typed_payload(&self) -> EventPayload {
        let payload_type = self.payload.get("type").and_then(Value::as_str);
        match (self.kind, payload_type) {
            (EventKind::ResponseItem, Some("message")) => decode(&self.payload)
                .map_or(EventPayload::Unknown, EventPayload::Message),
            (EventKind::ResponseItem, Some("reasoning")) => decode(&self.payload)
                .map_or(EventPayload::Unknown, EventPayload::Reasoning),
            (EventKind::ResponseItem, Some("function_call")) => decode(&self.payload)
                .map_or(EventPayload::Unknown, EventPayload::FunctionCall),
            (EventKind::ResponseItem, Some("function_call_output")) => decode(&self.payload)
                .map_or(EventPayload::Unknown, EventPayload::FunctionCallOutput),
            (EventKind::EventMsg, Some("token_count")) => decode(&self.payload)
                .map_or(EventPayload::Unknown, EventPayload::TokenCount),
            (EventKind::EventMsg, Some("approval_request")) => {
                EventPayload::ApprovalRequest(self.payload.clone())
            }
            _ => EventPayload::Unknown,
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(payload: &Value) -> Option<T> {
    serde_json::from_value(payload.clone()).ok()
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
