//! The named-lock acquisition and release protocol.
//!
//! Acquisition runs a check-then-write over the lock's record file with the
//! shared gate held, so the sequence is atomic with respect to every other
//! acquirer on the machine:
//!
//! 1. Resolve the name to a record path.
//! 2. Enter the gate.
//! 3. If a record exists and its PID is alive, fail with
//!    `CannotAcquireLock`. A record whose PID is dead (or whose contents
//!    are not a PID) is stale and gets reclaimed.
//! 4. Write our own PID as the new record.
//! 5. Exit the gate and hand back a guard.
//!
//! Contention never blocks: the purpose is "run once across processes", not
//! "queue and run later". Only the gate wait itself blocks, for as long as
//! another process's own check-then-write takes.
//!
//! Release is a single idempotent delete and needs no gate: the worst a
//! racing delete can do is let a subsequent acquisition proceed as if the
//! lock were free, which is correct.

use crate::context::LockContext;
use crate::error::{Result, SoloError};
use crate::events::{Event, EventAction, LockObserver, NullObserver};
use crate::exit_codes;
use crate::gate::Gate;
use crate::locks::guard::LockGuard;
use crate::locks::record::{self, RecordState};
use crate::locks::name;
use crate::process::{KillProbe, ProcessProbe};
use crate::shutdown::ShutdownHooks;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A named cross-process exclusive lock.
///
/// Construction is cheap and touches nothing on disk; all protocol work
/// happens in [`Lock::acquire`] and friends.
pub struct Lock {
    ctx: LockContext,
    name: String,
    record_path: PathBuf,
    gate: Gate,
    die: bool,
    probe: Box<dyn ProcessProbe>,
    observer: Arc<dyn LockObserver>,
}

impl Lock {
    /// Create a lock with an explicit logical name.
    pub fn new(ctx: &LockContext, lock_name: impl Into<String>) -> Self {
        let lock_name = lock_name.into();
        let sanitized = name::sanitize(&lock_name);
        Self {
            record_path: ctx.record_path(&sanitized),
            gate: Gate::new(ctx.gate_path()),
            ctx: ctx.clone(),
            name: lock_name,
            die: false,
            probe: Box::new(KillProbe),
            observer: Arc::new(NullObserver),
        }
    }

    /// Create a lock scoped to "one instance of this program": the name is
    /// the current executable's path.
    pub fn for_current_exe(ctx: &LockContext) -> Result<Self> {
        Ok(Self::new(ctx, name::current_exe_name()?))
    }

    /// Enable fail-fast mode: on contention, print one diagnostic line to
    /// stderr and terminate the process instead of returning an error.
    /// I/O failures are unaffected and still propagate.
    pub fn with_die(mut self, die: bool) -> Self {
        self.die = die;
        self
    }

    /// Replace the liveness probe (tests, or hosts with exotic process
    /// tables).
    pub fn with_probe(mut self, probe: Box<dyn ProcessProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Attach an event sink. Without one, events are discarded.
    pub fn with_observer(mut self, observer: Arc<dyn LockObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Logical name of this lock.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of this lock's record file.
    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    /// Acquire the lock, returning a guard that releases it when dropped.
    ///
    /// Fails with [`SoloError::CannotAcquireLock`] when another live
    /// process holds the lock. In fail-fast mode that failure terminates
    /// the process with [`exit_codes::LOCK_HELD`] instead.
    pub fn acquire(&self) -> Result<LockGuard> {
        match self.try_acquire() {
            Err(err @ SoloError::CannotAcquireLock { .. }) if self.die => {
                eprintln!("{}", err);
                std::process::exit(exit_codes::LOCK_HELD);
            }
            other => other,
        }
    }

    fn try_acquire(&self) -> Result<LockGuard> {
        self.ctx.ensure_lock_dir()?;
        let my_pid = std::process::id();

        {
            let _gate = self.gate.enter()?;

            match record::read(&self.record_path)? {
                RecordState::Owned(pid) if self.probe.is_alive(pid) => {
                    return Err(SoloError::CannotAcquireLock {
                        name: self.name.clone(),
                        path: self.record_path.clone(),
                        pid,
                    });
                }
                // Absent, invalid, or stale: the lock is ours to claim.
                _ => {}
            }

            record::write(&self.record_path, my_pid)?;
            // Gate released here; the record now holds the lock.
        }

        self.observer.observe(&Event::new(
            EventAction::Acquired,
            &self.name,
            &self.record_path,
            my_pid,
        ));

        Ok(LockGuard::new(
            self.name.clone(),
            self.record_path.clone(),
            my_pid,
            Arc::clone(&self.observer),
        ))
    }

    /// Run a closure under the lock: one full acquire-call-release cycle
    /// per invocation.
    ///
    /// Sequential calls from the same process each succeed; a call made
    /// while another live process holds the lock fails before `f` runs.
    /// If `f` panics, the guard still releases during unwinding.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> Result<T> {
        let guard = self.acquire()?;
        let value = f();
        guard.release()?;
        Ok(value)
    }

    /// Acquire the lock for the remaining lifetime of the process.
    ///
    /// Release is registered with the supplied shutdown-hook registry and
    /// runs at normal termination; there is no earlier release point. If
    /// the process dies ungracefully the record stays behind with a dead
    /// PID, to be reclaimed by the next acquirer's staleness check.
    pub fn forever(&self, hooks: &dyn ShutdownHooks) -> Result<()> {
        let guard = self.acquire()?;
        hooks.register(Box::new(move || drop(guard)));
        Ok(())
    }
}

impl std::fmt::Debug for Lock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lock")
            .field("name", &self.name)
            .field("record_path", &self.record_path)
            .field("die", &self.die)
            .finish()
    }
}

/// Information about one lock record on disk.
#[derive(Debug, Clone)]
pub struct LockInfo {
    /// Sanitized lock name, recovered from the record filename.
    pub name: String,

    /// The record file path.
    pub path: PathBuf,

    /// Owner PID, when the record contents parse as one.
    pub pid: Option<u32>,

    /// Whether the owner is currently alive. A record that is not alive is
    /// stale and will be reclaimed by the next acquisition.
    pub alive: bool,
}

impl std::fmt::Display for LockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pid {
            Some(pid) => write!(
                f,
                "{} (pid {}{})",
                self.name,
                pid,
                if self.alive { "" } else { ", STALE" }
            ),
            None => write!(f, "{} (invalid record, STALE)", self.name),
        }
    }
}

/// List all lock records in the context's directory.
///
/// Files that do not match the `<prefix><name>.lock` pattern are skipped;
/// the gate file never matches.
pub fn list_locks(ctx: &LockContext, probe: &dyn ProcessProbe) -> Result<Vec<LockInfo>> {
    let mut locks = Vec::new();

    if !ctx.lock_dir.exists() {
        return Ok(locks);
    }

    let entries = std::fs::read_dir(&ctx.lock_dir).map_err(|e| {
        SoloError::Io(format!(
            "failed to read lock directory '{}': {}",
            ctx.lock_dir.display(),
            e
        ))
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| {
            SoloError::Io(format!(
                "failed to read lock directory entry: {}",
                e
            ))
        })?;
        let path = entry.path();

        let Some(record_name) = ctx.record_name(&path) else {
            continue;
        };

        let pid = match record::read(&path)? {
            RecordState::Owned(pid) => Some(pid),
            RecordState::Invalid => None,
            // Deleted between readdir and read; it no longer exists to list.
            RecordState::Absent => continue,
        };

        locks.push(LockInfo {
            name: record_name,
            path,
            pid,
            alive: pid.is_some_and(|pid| probe.is_alive(pid)),
        });
    }

    locks.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(locks)
}

/// Remove the record for a named lock, returning what was removed.
///
/// The caller is responsible for deciding that removal is appropriate
/// (the CLI requires `--force`). Removing a live holder's record does not
/// stop the holder; it only lets the next acquirer win.
pub fn clear_record(
    ctx: &LockContext,
    lock_name: &str,
    probe: &dyn ProcessProbe,
) -> Result<LockInfo> {
    let sanitized = name::sanitize(lock_name);
    let path = ctx.record_path(&sanitized);

    let pid = match record::read(&path)? {
        RecordState::Absent => {
            return Err(SoloError::UserError(format!(
                "lock '{}' does not exist at: {}",
                lock_name,
                path.display()
            )));
        }
        RecordState::Invalid => None,
        RecordState::Owned(pid) => Some(pid),
    };

    let info = LockInfo {
        name: sanitized,
        path: path.clone(),
        pid,
        alive: pid.is_some_and(|pid| probe.is_alive(pid)),
    };

    record::remove(&path)?;
    Ok(info)
}
