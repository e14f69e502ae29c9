//! Turn reconstruction: a single fold over the ordered event slice.
//!
//! [`summarize_turn`] threads five growing arrays (user messages, assistant
//! messages, reasoning, plan updates, tool calls) plus a `call_id → entry`
//! index and a timeline through one left-to-right pass. The timeline is the
//! only record of relative ordering between the arrays.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::event::{EventPayload, TranscriptEvent};
use crate::plan::is_plan_update;

/// One tool invocation, correlated with its outputs by `call_id`.
///
/// An output that arrives with no matching call produces a placeholder
/// entry with null name/arguments/start; orphan outputs are never dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallEntry {
    /// Correlation id, when the call carried one.
    pub call_id: Option<String>,
    /// Tool name; `null` for placeholder entries.
    pub tool_name: Option<String>,
    /// Call arguments, JSON-parsed when they arrived as a JSON string.
    pub arguments: Value,
    /// Timestamp of the originating call event.
    pub started_at: Option<String>,
    /// Outputs in arrival order.
    pub outputs: Vec<ToolCallOutput>,
}

/// One tool output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallOutput {
    /// Timestamp of the output event.
    pub timestamp: Option<String>,
    /// Output value, JSON-parsed when it arrived as a JSON string.
    pub result: Value,
}

/// Which array a timeline entry points into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineKind {
    /// `messages.user`
    UserMessage,
    /// `messages.assistant`
    AssistantMessage,
    /// `messages.assistant_reasoning`
    AssistantReasoning,
    /// `messages.assistant_plan_updates`
    AssistantPlanUpdate,
    /// `assistant_tool_calls`
    AssistantToolCall,
    /// `assistant_tool_calls[index].outputs[output_index]`
    AssistantToolOutput,
}

/// One chronological marker: which array grew, and at which index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Array discriminator.
    pub event: TimelineKind,
    /// Index into that array.
    pub index: usize,
    /// For tool outputs, the index within the entry's `outputs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_index: Option<usize>,
}

/// Everything reconstructed from one span of transcript events.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TurnSummary {
    /// User message texts, in order.
    pub user_messages: Vec<String>,
    /// Assistant message texts, in order.
    pub assistant_messages: Vec<String>,
    /// Free-form reasoning summaries.
    pub assistant_reasoning: Vec<String>,
    /// Reasoning summaries classified as plan/checklist updates.
    pub assistant_plan_updates: Vec<String>,
    /// Tool invocations with correlated outputs.
    pub tool_calls: Vec<ToolCallEntry>,
    /// `token_count` telemetry blocks, verbatim.
    pub token_counts: Vec<Value>,
    /// `approval_request` payloads, verbatim.
    pub approvals: Vec<Value>,
    /// Total events in the span, including ignored kinds.
    pub event_count: usize,
    /// Cross-array chronological order.
    pub timeline: Vec<TimelineEntry>,
}

impl TurnSummary {
    fn mark(&mut self, event: TimelineKind, index: usize) {
        self.timeline.push(TimelineEntry {
            event,
            index,
            output_index: None,
        });
    }
}

/// Fold an ordered event slice into a [`TurnSummary`].
#[must_use]
pub fn summarize_turn(events: &[TranscriptEvent]) -> TurnSummary {
    let mut summary = TurnSummary {
        event_count: events.len(),
        ..TurnSummary::default()
    };
    // call_id → index into summary.tool_calls
    let mut call_index: HashMap<String, usize> = HashMap::new();

    for event in events {
        match event.typed_payload() {
            EventPayload::Message(message) => {
                let text = message.flattened_text();
                match message.role.as_deref() {
                    Some("user") => {
                        summary.user_messages.push(text);
                        summary.mark(TimelineKind::UserMessage, summary.user_messages.len() - 1);
                    }
                    Some("assistant") => {
                        summary.assistant_messages.push(text);
                        summary.mark(
                            TimelineKind::AssistantMessage,
                            summary.assistant_messages.len() - 1,
                        );
                    }
                    _ => {}
                }
            }
            EventPayload::Reasoning(reasoning) => {
                let text = reasoning.summary_text();
                if text.is_empty() {
                    continue;
                }
                if is_plan_update(&text) {
                    summary.assistant_plan_updates.push(text);
                    summary.mark(
                        TimelineKind::AssistantPlanUpdate,
                        summary.assistant_plan_updates.len() - 1,
                    );
                } else {
                    summary.assistant_reasoning.push(text);
                    summary.mark(
                        TimelineKind::AssistantReasoning,
                        summary.assistant_reasoning.len() - 1,
                    );
                }
            }
            EventPayload::FunctionCall(call) => {
                let entry = ToolCallEntry {
                    call_id: call.call_id.clone(),
                    tool_name: call.name,
                    arguments: parse_jsonish(call.arguments),
                    started_at: event.timestamp.clone(),
                    outputs: Vec::new(),
                };
                summary.tool_calls.push(entry);
                let index = summary.tool_calls.len() - 1;
                summary.mark(TimelineKind::AssistantToolCall, index);
                if let Some(call_id) = call.call_id {
                    let _ = call_index.insert(call_id, index);
                }
            }
            EventPayload::FunctionCallOutput(output) => {
                let index = match output.call_id.as_ref().and_then(|id| call_index.get(id)) {
                    Some(&index) => index,
                    None => {
                        // Orphan output: hold it in a placeholder entry.
                        summary.tool_calls.push(ToolCallEntry {
                            call_id: output.call_id.clone(),
                            tool_name: None,
                            arguments: Value::Null,
                            started_at: None,
                            outputs: Vec::new(),
                        });
                        let index = summary.tool_calls.len() - 1;
                        if let Some(call_id) = output.call_id.clone() {
                            let _ = call_index.insert(call_id, index);
                        }
                        index
                    }
                };
                summary.tool_calls[index].outputs.push(ToolCallOutput {
                    timestamp: event.timestamp.clone(),
                    result: parse_jsonish(output.output),
                });
                summary.timeline.push(TimelineEntry {
                    event: TimelineKind::AssistantToolOutput,
                    index,
                    output_index: Some(summary.tool_calls[index].outputs.len() - 1),
                });
            }
            EventPayload::TokenCount(tokens) => {
                summary.token_counts.push(tokens.info);
            }
            EventPayload::ApprovalRequest(payload) => {
                summary.approvals.push(payload);
            }
            EventPayload::Unknown => {}
        }
    }

    summary
}

/// Decode a value that may be a JSON document disguised as a string.
///
/// Non-strings pass through untouched. A whitespace-only string maps to the
/// empty string; a string that fails to parse as JSON is kept raw.
#[must_use]
pub fn parse_jsonish(value: Value) -> Value {
    let Value::String(raw) = value else {
        return value;
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::String(String::new());
    }
    let parsed: Result<Value, _> = serde_json::from_str(trimmed);
    parsed.unwrap_or(Value::String(raw))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
