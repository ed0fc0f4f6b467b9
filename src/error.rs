//! Error types for solo.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.
//! Contention (`CannotAcquireLock`) is kept distinct from environment problems
//! (`Io`): the former means "already running", the latter means something is
//! wrong with the lock directory or record files themselves.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for solo operations.
///
/// Each variant maps to a specific exit code via [`SoloError::exit_code`].
#[derive(Error, Debug)]
pub enum SoloError {
    /// The named lock is held by another live process.
    ///
    /// Carries the logical name, the record path, and the conflicting PID
    /// for diagnostics. Recoverable by the caller; never retried here.
    #[error("another '{name}' process is already running (pid {pid})")]
    CannotAcquireLock {
        /// Logical name of the contended lock.
        name: String,
        /// Path of the lock record on disk.
        path: PathBuf,
        /// PID of the live holder.
        pid: u32,
    },

    /// Reading, writing, or deleting lock state failed.
    #[error("{0}")]
    Io(String),

    /// User provided invalid arguments or configuration.
    #[error("{0}")]
    UserError(String),

    /// The command wrapped by `solo run` exited with a nonzero status.
    #[error("command exited with status {0}")]
    CommandFailed(i32),
}

impl SoloError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            SoloError::CannotAcquireLock { .. } => exit_codes::LOCK_HELD,
            SoloError::Io(_) => exit_codes::IO_FAILURE,
            SoloError::UserError(_) => exit_codes::USER_ERROR,
            SoloError::CommandFailed(code) => *code,
        }
    }
}

/// Result type alias for solo operations.
pub type Result<T> = std::result::Result<T, SoloError>;
