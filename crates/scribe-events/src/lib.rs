//! # scribe-events
//!
//! Transcript event model and turn reconstruction.
//!
//! The host runtime appends one JSON event per transcript line. This crate
//! deserializes those lines into [`TranscriptEvent`]s, folds an ordered
//! slice of them into a [`TurnSummary`] (messages by role, reasoning vs.
//! plan updates, correlated tool calls, telemetry, and a chronological
//! timeline), and assembles the write-once [`TurnRecord`] that the sinks
//! append downstream.
//!
//! Everything here is pure data-in/data-out; no filesystem access.

#![deny(unsafe_code)]

pub mod event;
pub mod plan;
pub mod record;
pub mod summarize;

pub use event::{EventKind, EventPayload, TranscriptEvent};
pub use plan::is_plan_update;
pub use record::TurnRecord;
pub use summarize::{summarize_turn, TurnSummary};
