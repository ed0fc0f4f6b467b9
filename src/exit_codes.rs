//! Exit code constants for the solo CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: I/O failure (lock directory, record, or gate problems)
//! - 3: Lock held by another live process

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or invalid configuration.
pub const USER_ERROR: i32 = 1;

/// I/O failure: the environment prevented reading or writing lock state.
pub const IO_FAILURE: i32 = 2;

/// Lock contention: the named lock is held by another live process.
/// This is also the status fail-fast mode terminates with.
pub const LOCK_HELD: i32 = 3;
