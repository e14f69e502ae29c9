#![allow(missing_docs, unused_results)]

//! End-to-end flow: a transcript on disk, a notification payload, and the
//! full locate → tail → summarize → sink → commit pipeline.

use std::io::Write;
use std::path::{Path, PathBuf};

use assert_matches::assert_matches;
use serde_json::{json, Value};

use scribe_core::ScribeConfig;
use scribe_hook::{run, RunOutcome};

fn test_config(root: &Path) -> ScribeConfig {
    ScribeConfig {
        sessions_dir: root.join("sessions"),
        audit_dir: root.join("audit"),
        export_dir: root.join("export"),
        session_log_dir: root.join("session-logs"),
        mirror_prefix: "codex".to_string(),
    }
}

fn transcript_path(config: &ScribeConfig, session_id: &str) -> PathBuf {
    config
        .sessions_dir
        .join("2025")
        .join(format!("rollout-2025-06-01-{session_id}.jsonl"))
}

fn append_lines(path: &Path, lines: &[&str]) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
}

fn read_json_lines(path: &Path) -> Vec<Value> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn full_turn_is_mirrored_into_all_sinks() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let transcript = transcript_path(&config, "sess-abc");
    append_lines(
        &transcript,
        &[
            r#"{"timestamp":"t0","type":"response_item","payload":{"type":"message","role":"user","content":[{"text":"run the tests"}]}}"#,
            r#"{"timestamp":"t1","type":"response_item","payload":{"type":"reasoning","summary":[{"text":"Updated plan: fix the parser first"}]}}"#,
            r#"{"timestamp":"t2","type":"response_item","payload":{"type":"function_call","call_id":"c1","name":"shell","arguments":"{\"command\":\"cargo test\"}"}}"#,
            r#"{"timestamp":"t3","type":"response_item","payload":{"type":"function_call_output","call_id":"c1","output":"{\"exit_code\":0}"}}"#,
            r#"{"timestamp":"t4","type":"response_item","payload":{"type":"message","role":"assistant","content":[{"text":"all green"}]}}"#,
            r#"{"timestamp":"t5","type":"event_msg","payload":{"type":"token_count","info":{"input":120,"output":40}}}"#,
        ],
    );

    let payload = json!({
        "type": "agent-turn-complete",
        "thread-id": "sess-abc",
        "turn-id": "turn-1",
        "cwd": "/work/repo",
        "input-messages": ["run the tests"],
        "last-assistant-message": "all green"
    })
    .to_string();

    assert_matches!(run(&payload, &config).unwrap(), RunOutcome::Recorded);

    let records = read_json_lines(&config.turn_log_path());
    assert_eq!(records.len(), 1);
    let record = &records[0];

    assert_eq!(record["session"]["id"], "sess-abc");
    assert_eq!(record["session"]["cwd"], "/work/repo");
    assert_eq!(
        record["session"]["transcript_path"],
        transcript.to_string_lossy().as_ref()
    );
    assert_eq!(record["turn"]["id"], "turn-1");
    assert_eq!(record["turn"]["input_messages"], json!(["run the tests"]));
    assert_eq!(record["turn"]["last_assistant_message"], "all green");

    assert_eq!(record["messages"]["user"], json!(["run the tests"]));
    assert_eq!(record["messages"]["assistant"], json!(["all green"]));
    assert_eq!(
        record["messages"]["assistant_plan_updates"],
        json!(["Updated plan: fix the parser first"])
    );
    assert_eq!(record["messages"]["assistant_reasoning"], json!([]));

    let calls = record["assistant_tool_calls"].as_array().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["tool_name"], "shell");
    assert_eq!(calls[0]["arguments"], json!({"command": "cargo test"}));
    assert_eq!(calls[0]["started_at"], "t2");
    assert_eq!(calls[0]["outputs"][0]["result"], json!({"exit_code": 0}));

    assert_eq!(record["telemetry"]["event_count"], 6);
    assert_eq!(
        record["telemetry"]["token_counts"],
        json!([{"input": 120, "output": 40}])
    );

    assert_eq!(
        record["timeline"],
        json!([
            {"event": "user_message", "index": 0},
            {"event": "assistant_plan_update", "index": 0},
            {"event": "assistant_tool_call", "index": 0},
            {"event": "assistant_tool_output", "index": 0, "output_index": 0},
            {"event": "assistant_message", "index": 0}
        ])
    );

    // Same line in the per-session log and in the mirror.
    let session_records =
        read_json_lines(&config.session_log_dir.join("sess-abc.jsonl"));
    assert_eq!(session_records, records);
    let mirror_records =
        read_json_lines(&config.export_dir.join("codex_turn_log.jsonl"));
    assert_eq!(mirror_records, records);
}

#[test]
fn repeat_invocation_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    append_lines(
        &transcript_path(&config, "sess-abc"),
        &[r#"{"type":"response_item","payload":{"type":"message","role":"user","content":[{"text":"hi"}]}}"#],
    );
    let payload = r#"{"thread-id":"sess-abc"}"#;

    assert_matches!(run(payload, &config).unwrap(), RunOutcome::Recorded);
    assert_matches!(run(payload, &config).unwrap(), RunOutcome::NoNewEvents);
    assert_matches!(run(payload, &config).unwrap(), RunOutcome::NoNewEvents);

    assert_eq!(read_json_lines(&config.turn_log_path()).len(), 1);
}

#[test]
fn spans_chain_across_turns() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let transcript = transcript_path(&config, "sess-abc");
    let payload = r#"{"thread-id":"sess-abc"}"#;

    for text in ["one", "two", "three"] {
        append_lines(
            &transcript,
            &[&format!(
                r#"{{"type":"response_item","payload":{{"type":"message","role":"user","content":[{{"text":"{text}"}}]}}}}"#
            )],
        );
        assert_matches!(run(payload, &config).unwrap(), RunOutcome::Recorded);
    }

    let records = read_json_lines(&config.turn_log_path());
    assert_eq!(records.len(), 3);
    for pair in records.windows(2) {
        assert_eq!(pair[1]["turn"]["log_span"]["start"], pair[0]["turn"]["log_span"]["end"]);
    }
    assert_eq!(records[2]["messages"]["user"], json!(["three"]));
}

#[test]
fn orphan_output_survives_into_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    append_lines(
        &transcript_path(&config, "sess-abc"),
        &[r#"{"type":"response_item","payload":{"type":"function_call_output","call_id":"ghost","output":"late"}}"#],
    );

    assert_matches!(
        run(r#"{"thread-id":"sess-abc"}"#, &config).unwrap(),
        RunOutcome::Recorded
    );

    let records = read_json_lines(&config.turn_log_path());
    let calls = records[0]["assistant_tool_calls"].as_array().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["call_id"], "ghost");
    assert_eq!(calls[0]["tool_name"], Value::Null);
    assert_eq!(calls[0]["outputs"][0]["result"], "late");
}

#[test]
fn unflushed_session_leaves_no_audit_log() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());

    assert_matches!(
        run(r#"{"thread-id":"sess-new"}"#, &config).unwrap(),
        RunOutcome::TranscriptNotFound
    );
    assert!(!config.turn_log_path().exists());
    assert!(config.error_log_path().exists());
}

#[test]
fn session_ids_are_sanitized_for_filenames() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    append_lines(
        &config.sessions_dir.join("rollout-sess:odd.jsonl"),
        &[r#"{"type":"response_item","payload":{"type":"message","role":"user","content":[{"text":"hi"}]}}"#],
    );

    assert_matches!(
        run(r#"{"thread-id":"sess:odd"}"#, &config).unwrap(),
        RunOutcome::Recorded
    );
    assert!(config.session_log_dir.join("sess_odd.jsonl").exists());
}
