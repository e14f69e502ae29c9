//! # scribe-store
//!
//! Durable state and filesystem I/O for the scribe audit hook:
//!
//! - **Offset state**: crash-safe `session → (transcript path, byte offset)`
//!   records, atomically replaced on every save
//! - **Session locator**: cached transcript path with a recursive
//!   filesystem search fallback
//! - **Transcript reader**: byte-range tail of a transcript, tolerant of
//!   malformed lines
//! - **Record sink**: append-only audit log, mirror copy, and per-session
//!   logs

#![deny(unsafe_code)]

pub mod locator;
pub mod reader;
pub mod sink;
pub mod state;

pub use locator::locate_transcript;
pub use reader::read_new_events;
pub use sink::RecordSink;
pub use state::{OffsetState, SessionOffset};
