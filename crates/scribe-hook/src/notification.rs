//! The one-shot notification payload the runtime passes on invocation.
//!
//! The runtime emits kebab-case keys (`thread-id`, `turn-id`, ...); older
//! builds used snake_case. Both spellings are accepted. Only the session
//! identifier is required; everything else is optional metadata carried
//! into the turn record verbatim.

use serde::Deserialize;
use serde_json::Value;

/// Parsed notification payload.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TurnNotification {
    /// Notification kind, e.g. `agent-turn-complete`. Informational only.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Session (thread) identifier. Required for the hook to do anything.
    #[serde(rename = "thread-id", alias = "thread_id", default)]
    pub thread_id: Option<String>,
    /// Turn identifier within the session.
    #[serde(rename = "turn-id", alias = "turn_id", default)]
    pub turn_id: Option<String>,
    /// Working directory the agent ran in.
    #[serde(default)]
    pub cwd: Option<String>,
    /// Input messages for the turn, verbatim.
    #[serde(rename = "input-messages", alias = "input_messages", default)]
    pub input_messages: Vec<Value>,
    /// The runtime's view of the final assistant message.
    #[serde(
        rename = "last-assistant-message",
        alias = "last_assistant_message",
        default
    )]
    pub last_assistant_message: Option<String>,
}

impl TurnNotification {
    /// Parse the raw process argument.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_kebab_case_payload() {
        let notification = TurnNotification::parse(
            r#"{"type":"agent-turn-complete","thread-id":"sess-1","turn-id":"turn-4",
                "cwd":"/work","input-messages":["fix the test"],
                "last-assistant-message":"done"}"#,
        )
        .unwrap();

        assert_eq!(notification.kind.as_deref(), Some("agent-turn-complete"));
        assert_eq!(notification.thread_id.as_deref(), Some("sess-1"));
        assert_eq!(notification.turn_id.as_deref(), Some("turn-4"));
        assert_eq!(notification.cwd.as_deref(), Some("/work"));
        assert_eq!(notification.input_messages, vec![json!("fix the test")]);
        assert_eq!(notification.last_assistant_message.as_deref(), Some("done"));
    }

    #[test]
    fn parses_snake_case_payload() {
        let notification = TurnNotification::parse(
            r#"{"thread_id":"sess-1","turn_id":"turn-4","input_messages":[],
                "last_assistant_message":null}"#,
        )
        .unwrap();
        assert_eq!(notification.thread_id.as_deref(), Some("sess-1"));
        assert_eq!(notification.turn_id.as_deref(), Some("turn-4"));
    }

    #[test]
    fn missing_fields_default() {
        let notification = TurnNotification::parse(r#"{"thread-id":"sess-1"}"#).unwrap();
        assert_eq!(notification.turn_id, None);
        assert_eq!(notification.cwd, None);
        assert!(notification.input_messages.is_empty());
        assert_eq!(notification.last_assistant_message, None);
    }

    #[test]
    fn missing_thread_id_parses_as_none() {
        let notification = TurnNotification::parse(r#"{"type":"agent-turn-complete"}"#).unwrap();
        assert_eq!(notification.thread_id, None);
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let notification =
            TurnNotification::parse(r#"{"thread-id":"sess-1","extra":{"nested":true}}"#).unwrap();
        assert_eq!(notification.thread_id.as_deref(), Some("sess-1"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(TurnNotification::parse("not json").is_err());
    }
}
