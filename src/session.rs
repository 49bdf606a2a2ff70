//! Session identity and output-path policy.
//!
//! A session is one bounded recording interval: a session id, an activity
//! label, and a start instant, bound to exactly one output file. The file
//! path is deterministic in the session id so the caller that started a
//! session can always locate its artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sentinel returned when `stop` is called before any session ever started.
pub const UNKNOWN_SESSION_ID: &str = "session_unknown";

/// Activity label applied when the caller provides none.
pub const DEFAULT_ACTIVITY: &str = "SITTING";

/// Identity of the currently (or most recently) active session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    /// Caller-provided session identifier.
    pub id: String,
    /// Caller-provided activity label, stamped on every row.
    pub activity: String,
    /// Instant the session transitioned to Recording.
    pub started_at: DateTime<Utc>,
}

/// What `stop` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopSummary {
    /// Path of the session's CSV artifact.
    pub file_path: PathBuf,
    /// Identifier of the stopped (or last-known) session.
    pub session_id: String,
}

/// Deterministic per-session output path: `<output_dir>/<session_id>.csv`.
pub fn session_path(output_dir: &Path, session_id: &str) -> PathBuf {
    output_dir.join(format!("{session_id}.csv"))
}
