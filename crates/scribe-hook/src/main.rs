//! # scribe-hook binary
//!
//! Invoked by the host runtime once per turn boundary with a single JSON
//! argument. Exits 0 on every path (the hook must never disrupt the
//! caller's workflow), so argument errors, pipeline errors, and write
//! failures all end up in the diagnostics log instead of the exit status.

#![deny(unsafe_code)]

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scribe_core::{DiagnosticsLog, ScribeConfig};

/// Turn-boundary audit hook for agent session transcripts.
#[derive(Parser, Debug)]
#[command(name = "scribe-hook", about = "Append a turn audit record from the session transcript")]
struct Cli {
    /// JSON notification payload emitted by the runtime.
    notification: String,
}

fn main() {
    // Stderr-only tracing; the caller ignores our output but a human
    // debugging the hook can raise SCRIBE_LOG.
    let filter = EnvFilter::try_from_env("SCRIBE_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ScribeConfig::load().unwrap_or_else(|err| {
        let fallback = ScribeConfig::default();
        DiagnosticsLog::new(fallback.error_log_path())
            .record(&format!("invalid hook config, using defaults: {err}"));
        fallback
    });

    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => {
            DiagnosticsLog::new(config.error_log_path())
                .record(&format!("hook requires exactly one JSON argument: {err}"));
            return;
        }
    };

    match scribe_hook::run(&args.notification, &config) {
        Ok(outcome) => tracing::debug!(?outcome, "hook finished"),
        Err(err) => {
            DiagnosticsLog::new(config.error_log_path()).record(&format!("unexpected error: {err:#}"));
        }
    }
}
