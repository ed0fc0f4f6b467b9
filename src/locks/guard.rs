//! RAII guard for a held named lock.

use crate::error::Result;
use crate::events::{Event, EventAction, LockObserver};
use crate::locks::record;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Proof that this process currently holds a named lock.
///
/// Dropping the guard releases the lock on every exit path, including panic
/// unwinding. If deletion fails during drop, a warning is printed but the
/// program does not crash; use [`LockGuard::release`] to observe the error
/// instead.
pub struct LockGuard {
    name: String,
    path: PathBuf,
    pid: u32,
    observer: Arc<dyn LockObserver>,
    released: bool,
}

impl LockGuard {
    pub(crate) fn new(
        name: String,
        path: PathBuf,
        pid: u32,
        observer: Arc<dyn LockObserver>,
    ) -> Self {
        Self {
            name,
            path,
            pid,
            observer,
            released: false,
        }
    }

    /// Logical name of the held lock.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the lock record on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock now, surfacing deletion errors.
    ///
    /// Removing a record that is already gone is not an error: the lock is
    /// released either way, and a racing acquirer proceeding as if the lock
    /// were free is exactly what release means.
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        record::remove(&self.path)?;
        self.observer.observe(&Event::new(
            EventAction::Released,
            &self.name,
            &self.path,
            self.pid,
        ));
        Ok(())
    }
}

impl std::fmt::Debug for LockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockGuard")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("pid", &self.pid)
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match record::remove(&self.path) {
            Ok(_) => {
                self.observer.observe(&Event::new(
                    EventAction::Released,
                    &self.name,
                    &self.path,
                    self.pid,
                ));
            }
            Err(e) => {
                eprintln!("Warning: failed to release lock '{}': {}", self.name, e);
            }
        }
    }
}
