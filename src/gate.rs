//! The meta-lock gate: one shared critical section for all acquirers.
//!
//! Acquisition is a check-then-write sequence over a record file, and two
//! processes running that sequence concurrently would race between the read
//! and the write. The gate closes that window: every acquirer on the machine
//! takes a blocking exclusive advisory lock on the same well-known file
//! before touching any record, so at most one check-then-write runs at a
//! time.
//!
//! An OS advisory lock is required here rather than a file-existence check:
//! the lock is tied to the holder's file descriptor, so a process that dies
//! mid-sequence releases the gate when the OS closes its descriptors. The
//! gate file itself carries no payload and represents nothing; "is lock X
//! held" is answered by records, never by the gate.

use crate::error::{Result, SoloError};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;

/// Handle on the shared gate file.
#[derive(Debug)]
pub struct Gate {
    path: PathBuf,
}

impl Gate {
    /// Create a gate handle for the given path. No file is touched until
    /// [`Gate::enter`].
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Block until an exclusive hold on the gate is obtained.
    ///
    /// The hold lasts until the returned guard is dropped. The wait is
    /// unbounded by design; other holders keep the gate only for the
    /// microseconds their own check-then-write takes.
    pub fn enter(&self) -> Result<GateGuard> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| {
                SoloError::Io(format!(
                    "failed to open gate file '{}': {}",
                    self.path.display(),
                    e
                ))
            })?;

        file.lock_exclusive().map_err(|e| {
            SoloError::Io(format!(
                "failed to lock gate file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(GateGuard { file })
    }
}

/// Exclusive hold on the gate, released on drop.
#[derive(Debug)]
pub struct GateGuard {
    file: File,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        // Closing the descriptor would release the lock anyway; unlocking
        // explicitly keeps release independent of drop ordering.
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
