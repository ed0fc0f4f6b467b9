//! Shutdown-hook registration for program-lifetime locks.
//!
//! A lock held "forever" must still delete its record at normal process
//! termination. The core does not own the mechanism; it depends on a
//! [`ShutdownHooks`] capability supplied by the caller. The bundled
//! [`ProcessExitHooks`] implementation keeps a process-global registry and
//! flushes it from an `atexit`-installed handler, so release runs on normal
//! exit paths. A process killed ungracefully never runs hooks; the stale
//! record it leaves behind is reclaimed by the next acquirer's liveness
//! check.

use std::sync::{Mutex, Once};

/// Capability: run a callback at normal process termination.
pub trait ShutdownHooks {
    /// Register one callback to run when the process exits normally.
    fn register(&self, hook: Box<dyn FnOnce() + Send>);
}

static HOOKS: Mutex<Vec<Box<dyn FnOnce() + Send>>> = Mutex::new(Vec::new());
static INSTALL: Once = Once::new();

extern "C" fn run_registered_hooks() {
    let hooks = {
        let mut guard = HOOKS.lock().unwrap_or_else(|poison| poison.into_inner());
        std::mem::take(&mut *guard)
    };
    for hook in hooks {
        hook();
    }
}

/// Shutdown-hook registry backed by the host process's `atexit` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExitHooks;

impl ShutdownHooks for ProcessExitHooks {
    fn register(&self, hook: Box<dyn FnOnce() + Send>) {
        INSTALL.call_once(|| {
            // SAFETY: run_registered_hooks is a plain extern "C" fn with no
            // arguments, exactly the shape atexit expects, and it stays
            // valid for the life of the process.
            unsafe {
                libc::atexit(run_registered_hooks);
            }
        });

        HOOKS
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .push(hook);
    }
}
