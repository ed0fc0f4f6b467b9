//! Configuration model for solo.
//!
//! Where lock state lives is configuration, not protocol: this module defines
//! the `Config` struct that names the lock directory, the record filename
//! prefix, and an optional event-log path. Config is loaded from a YAML file
//! when `SOLO_CONFIG` points at one; otherwise platform defaults apply.
//! Unknown fields in the YAML are ignored for forward compatibility.

use crate::error::{Result, SoloError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV_VAR: &str = "SOLO_CONFIG";

/// System lock directory used when present.
pub const SYSTEM_LOCK_DIR: &str = "/var/lock";

/// Default record filename prefix.
pub const DEFAULT_PREFIX: &str = "solo_";

fn default_lock_dir() -> PathBuf {
    let system = PathBuf::from(SYSTEM_LOCK_DIR);
    if system.is_dir() {
        system
    } else {
        std::env::temp_dir()
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

/// Configuration for solo lock state.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory for lock records and the gate file.
    ///
    /// Defaults to `/var/lock` when that is a directory, otherwise the
    /// system temporary directory.
    #[serde(default = "default_lock_dir")]
    pub lock_dir: PathBuf,

    /// Filename prefix for lock records (default: `solo_`).
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Optional NDJSON event-log path. Absent means no event sink.
    #[serde(default)]
    pub events_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_dir: default_lock_dir(),
            prefix: default_prefix(),
            events_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SoloError::UserError(format!(
                "failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Config = serde_yaml::from_str(&content).map_err(|e| {
            SoloError::UserError(format!(
                "failed to parse config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration from the environment.
    ///
    /// Reads the file named by `SOLO_CONFIG` when set; falls back to
    /// defaults when unset or unreadable.
    pub fn from_env() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Config::load(PathBuf::from(path)).unwrap_or_default(),
            None => Config::default(),
        }
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(SoloError::UserError(
                "config 'prefix' must not be empty".to_string(),
            ));
        }

        if !self
            .prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(SoloError::UserError(format!(
                "config 'prefix' contains characters unsafe for filenames: '{}'",
                self.prefix
            )));
        }

        if self.lock_dir.as_os_str().is_empty() {
            return Err(SoloError::UserError(
                "config 'lock_dir' must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
