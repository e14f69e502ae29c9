//! # scribe-core
//!
//! Foundation crate for the scribe audit hook.
//!
//! Provides the shared vocabulary the other scribe crates depend on:
//!
//! - **Errors**: `ScribeError` via `thiserror`, with path and operation context
//! - **Configuration**: `ScribeConfig` with compiled defaults, an optional
//!   JSON config file, and environment variable overrides
//! - **Diagnostics**: the durable plain-text error log written by every
//!   component that recovers from a failure
//! - **Filesystem helpers**: atomic replace, append-only line writes,
//!   filename sanitizing, on-demand directory creation

#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod fsutil;

pub use config::ScribeConfig;
pub use diagnostics::DiagnosticsLog;
pub use errors::{Result, ScribeError};
