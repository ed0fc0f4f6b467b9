//! Named cross-process locks.
//!
//! A named lock guarantees that the unit of work it protects runs in at most
//! one process at a time on this machine, even across unrelated processes.
//! Its entire persisted state is one record file holding the owner's PID;
//! a record whose PID is no longer alive is stale and silently reclaimed.
//! The check-then-write acquisition sequence is serialized machine-wide by
//! the gate in [`crate::gate`].
//!
//! # Acquisition styles
//!
//! - Scoped: [`Lock::acquire`] returns a [`LockGuard`] that releases on
//!   drop, on every exit path.
//! - Closure-wrapped: [`Lock::run`] performs one acquire-call-release cycle
//!   per invocation.
//! - Program-lifetime: [`Lock::forever`] holds until normal process
//!   termination via a shutdown-hook registry.
//! - Fail-fast: [`Lock::with_die`] turns contention into a one-line stderr
//!   diagnostic and immediate process exit.

mod guard;
mod name;
mod operations;
mod record;


// Re-export public API
pub use guard::LockGuard;
pub use name::{current_exe_name, sanitize};
pub use operations::{clear_record, list_locks, Lock, LockInfo};
pub use record::{read as read_record, RecordState};
