//! Hook configuration with compiled defaults and environment overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`ScribeConfig::default()`] (rooted at the agent
//!    home, `$CODEX_HOME` or `~/.codex`)
//! 2. If `<agent home>/audit/config.json` exists, its values override the
//!    defaults per-field
//! 3. Apply `SCRIBE_*` environment variable overrides (highest priority)
//!
//! A missing config file is normal; an unparsable one is an error the caller
//! is expected to treat as fail-open (fall back to defaults).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::Result;

/// Filename of the global audit log inside the audit directory.
pub const TURN_LOG_FILENAME: &str = "turn_log.jsonl";
/// Filename of the offset store inside the audit directory.
pub const STATE_FILENAME: &str = "state.json";
/// Filename of the diagnostics log inside the audit directory.
pub const ERROR_LOG_FILENAME: &str = "errors.log";

/// Resolve the host agent's home directory (`$CODEX_HOME` or `~/.codex`).
#[must_use]
pub fn agent_home() -> PathBuf {
    if let Some(home) = std::env::var("CODEX_HOME").ok().filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    user_home().join(".codex")
}

/// Resolve the invoking user's home directory.
fn user_home() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
    PathBuf::from(home)
}

/// Where the hook reads transcripts from and writes audit records to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScribeConfig {
    /// Root searched recursively for session transcripts.
    pub sessions_dir: PathBuf,
    /// Directory holding the audit log, offset store, and diagnostics log.
    pub audit_dir: PathBuf,
    /// Directory the audit log is mirrored into after every append.
    pub export_dir: PathBuf,
    /// Directory holding one append-only log per session.
    pub session_log_dir: PathBuf,
    /// Filename prefix for the mirrored audit log.
    pub mirror_prefix: String,
}

impl Default for ScribeConfig {
    fn default() -> Self {
        let home = agent_home();
        let documents = user_home().join("Documents");
        Self {
            sessions_dir: home.join("sessions"),
            audit_dir: home.join("audit"),
            export_dir: documents.join("llm_agent_logs"),
            session_log_dir: documents.join("codex-logs"),
            mirror_prefix: "codex".to_string(),
        }
    }
}

impl ScribeConfig {
    /// Default location of the config file (`<agent home>/audit/config.json`).
    #[must_use]
    pub fn config_path() -> PathBuf {
        agent_home().join("audit").join("config.json")
    }

    /// Load from the default path with env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_path())
    }

    /// Load from a specific path with env var overrides.
    ///
    /// If the file does not exist, returns defaults. If the file contains
    /// invalid JSON, returns an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            debug!(?path, "loading hook config from file");
            let content = std::fs::read_to_string(path)
                .map_err(|source| crate::errors::ScribeError::io("reading config", path, source))?;
            serde_json::from_str(&content)?
        } else {
            debug!(?path, "config file not found, using defaults");
            Self::default()
        };
        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Path of the global audit log.
    #[must_use]
    pub fn turn_log_path(&self) -> PathBuf {
        self.audit_dir.join(TURN_LOG_FILENAME)
    }

    /// Path of the offset store.
    #[must_use]
    pub fn state_path(&self) -> PathBuf {
        self.audit_dir.join(STATE_FILENAME)
    }

    /// Path of the diagnostics log.
    #[must_use]
    pub fn error_log_path(&self) -> PathBuf {
        self.audit_dir.join(ERROR_LOG_FILENAME)
    }
}

/// Apply `SCRIBE_*` environment variable overrides to a loaded config.
pub fn apply_env_overrides(config: &mut ScribeConfig) {
    if let Some(v) = read_env_path("SCRIBE_SESSIONS_DIR") {
        config.sessions_dir = v;
    }
    if let Some(v) = read_env_path("SCRIBE_AUDIT_DIR") {
        config.audit_dir = v;
    }
    if let Some(v) = read_env_path("SCRIBE_EXPORT_DIR") {
        config.export_dir = v;
    }
    if let Some(v) = read_env_path("SCRIBE_SESSION_LOG_DIR") {
        config.session_log_dir = v;
    }
    if let Some(v) = read_env_string("SCRIBE_MIRROR_PREFIX") {
        config.mirror_prefix = v;
    }
}

fn read_env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn read_env_path(name: &str) -> Option<PathBuf> {
    read_env_string(name).map(PathBuf::from)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
