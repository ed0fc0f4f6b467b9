//! Cross-process exclusive locks for named units of work.
//!
//! `solo` guarantees that a named unit of work (a code block, a wrapped
//! command, or a whole program run) executes in at most one operating-system
//! process at a time on a given machine, even across unrelated processes
//! that share nothing but the filesystem.
//!
//! A named lock's entire persisted state is a record file holding the
//! owner's PID as decimal text. Acquisition reads the record, probes whether
//! the recorded process is still alive, and claims the lock by overwriting
//! the record with its own PID; a record whose owner is dead is stale and
//! reclaimed silently. The read-probe-write sequence is serialized across
//! all processes by a single OS advisory lock on a well-known gate file, so
//! two racing acquirers can never both observe "free" ([`gate`]).
//!
//! Contention is reported, not resolved: if another live process holds the
//! name, acquisition fails immediately with
//! [`error::SoloError::CannotAcquireLock`]. This is a "run once across
//! processes" tool, not a queue.
//!
//! ```no_run
//! use solo::config::Config;
//! use solo::context::LockContext;
//! use solo::locks::Lock;
//!
//! let ctx = LockContext::new(&Config::default());
//! let guard = Lock::new(&ctx, "nightly-backup").acquire()?;
//! // ... at most one process runs this at a time ...
//! guard.release()?;
//! # Ok::<(), solo::error::SoloError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod gate;
pub mod locks;
pub mod process;
pub mod shutdown;

#[cfg(test)]
mod test_support;
