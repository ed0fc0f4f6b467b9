//! Lock lifecycle events.
//!
//! Acquisition and release each emit one informational event carrying the
//! lock name, record path, and PID. Events go to an externally supplied
//! [`LockObserver`]; not supplying one is fine (`NullObserver`). The bundled
//! file sink appends events in NDJSON format (one JSON object per line), so
//! an event log can be tailed or replayed for audit.
//!
//! Observation is strictly best-effort: a sink that fails to record an
//! event warns on stderr and never fails the lock protocol itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Lifecycle transitions that produce events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// A named lock was acquired.
    Acquired,
    /// A named lock was released.
    Released,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Acquired => write!(f, "acquired"),
            EventAction::Released => write!(f, "released"),
        }
    }
}

/// One lock lifecycle event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The transition that happened.
    pub action: EventAction,

    /// Logical name of the lock.
    pub name: String,

    /// Path of the lock record on disk.
    pub path: PathBuf,

    /// PID of the process the event is about.
    pub pid: u32,

    /// Who performed the action (e.g. `user@HOST`).
    pub actor: String,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction, name: &str, path: &Path, pid: u32) -> Self {
        Self {
            ts: Utc::now(),
            action,
            name: name.to_string(),
            path: path.to_path_buf(),
            pid,
            actor: actor_string(),
        }
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Get the actor string for event metadata.
fn actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Externally supplied sink for lock lifecycle events.
pub trait LockObserver: Send + Sync {
    /// Receive one event. Must not panic; failures are the sink's problem.
    fn observe(&self, event: &Event);
}

/// Observer that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl LockObserver for NullObserver {
    fn observe(&self, _event: &Event) {}
}

/// Observer that appends events to an NDJSON file.
#[derive(Debug, Clone)]
pub struct NdjsonObserver {
    path: PathBuf,
}

impl NdjsonObserver {
    /// Create an observer appending to the given file.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn append(&self, event: &Event) -> std::io::Result<()> {
        let line = event
            .to_ndjson_line()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.sync_all()
    }
}

impl LockObserver for NdjsonObserver {
    fn observe(&self, event: &Event) {
        if let Err(e) = self.append(event) {
            eprintln!(
                "Warning: failed to record lock event in '{}': {}",
                self.path.display(),
                e
            );
        }
    }
}
