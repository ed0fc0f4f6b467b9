//! Lock directory resolution for solo.
//!
//! All lock state for one machine lives in a single configured directory:
//! one record file per named lock, plus one well-known gate file. This module
//! resolves those paths so every component derives them the same way.

use crate::config::Config;
use crate::error::{Result, SoloError};
use std::path::{Path, PathBuf};

/// Filename extension for lock records.
pub const RECORD_EXTENSION: &str = "lock";

/// Well-known gate filename suffix, appended to the prefix.
///
/// The gate deliberately has no `.lock` extension so record enumeration
/// never mistakes it for a named lock.
pub const GATE_FILE_NAME: &str = "gate";

/// Resolved paths for solo lock state.
#[derive(Debug, Clone)]
pub struct LockContext {
    /// Base directory holding records and the gate file.
    pub lock_dir: PathBuf,

    /// Filename prefix for records and the gate.
    pub prefix: String,
}

impl LockContext {
    /// Build a context from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            lock_dir: config.lock_dir.clone(),
            prefix: config.prefix.clone(),
        }
    }

    /// Build a context from configuration with an optional directory override.
    ///
    /// CLI flags take precedence over config file values.
    pub fn with_override(config: &Config, lock_dir: Option<PathBuf>) -> Self {
        let mut ctx = Self::new(config);
        if let Some(dir) = lock_dir {
            ctx.lock_dir = dir;
        }
        ctx
    }

    /// Path of the record file for an already-sanitized lock name.
    pub fn record_path(&self, sanitized: &str) -> PathBuf {
        self.lock_dir
            .join(format!("{}{}.{}", self.prefix, sanitized, RECORD_EXTENSION))
    }

    /// Path of the shared gate file.
    pub fn gate_path(&self) -> PathBuf {
        self.lock_dir.join(format!("{}{}", self.prefix, GATE_FILE_NAME))
    }

    /// Create the lock directory if it does not exist yet.
    pub fn ensure_lock_dir(&self) -> Result<()> {
        if !self.lock_dir.exists() {
            std::fs::create_dir_all(&self.lock_dir).map_err(|e| {
                SoloError::Io(format!(
                    "failed to create lock directory '{}': {}",
                    self.lock_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Recover the sanitized lock name from a record path, if the path is a
    /// record belonging to this context (right directory, prefix, extension).
    pub fn record_name(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION) {
            return None;
        }
        let stem = path.file_stem().and_then(|s| s.to_str())?;
        stem.strip_prefix(&self.prefix).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_context;

    #[test]
    fn record_path_uses_prefix_and_extension() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("backup");
        assert!(path.starts_with(&ctx.lock_dir));
        assert!(path.ends_with("solo_backup.lock"));
    }

    #[test]
    fn gate_path_has_no_record_extension() {
        let (_temp, ctx) = test_context();
        let gate = ctx.gate_path();
        assert!(gate.ends_with("solo_gate"));
        assert!(ctx.record_name(&gate).is_none());
    }

    #[test]
    fn gate_never_collides_with_a_record_named_gate() {
        let (_temp, ctx) = test_context();
        assert_ne!(ctx.gate_path(), ctx.record_path("gate"));
    }

    #[test]
    fn record_name_round_trips() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("nightly-backup");
        assert_eq!(ctx.record_name(&path), Some("nightly-backup".to_string()));
    }

    #[test]
    fn record_name_rejects_foreign_files() {
        let (_temp, ctx) = test_context();
        assert_eq!(ctx.record_name(Path::new("/tmp/other_name.lock")), None);
        assert_eq!(ctx.record_name(Path::new("/tmp/solo_name.txt")), None);
    }

    #[test]
    fn ensure_lock_dir_creates_missing_directory() {
        let (temp, mut ctx) = test_context();
        ctx.lock_dir = temp.path().join("nested").join("locks");
        assert!(!ctx.lock_dir.exists());

        ctx.ensure_lock_dir().unwrap();
        assert!(ctx.lock_dir.is_dir());

        // Idempotent on an existing directory.
        ctx.ensure_lock_dir().unwrap();
    }

    #[test]
    fn with_override_prefers_cli_directory() {
        let config = crate::config::Config::default();
        let ctx = LockContext::with_override(&config, Some(PathBuf::from("/tmp/elsewhere")));
        assert_eq!(ctx.lock_dir, PathBuf::from("/tmp/elsewhere"));

        let ctx = LockContext::with_override(&config, None);
        assert_eq!(ctx.lock_dir, config.lock_dir);
    }
}
