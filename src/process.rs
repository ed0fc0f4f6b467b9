//! Process liveness probing.
//!
//! The acquisition protocol needs one answer from the host: "is PID P a
//! currently running process?" The probe is injected as a trait so tests
//! can substitute deterministic answers; the default sends the null signal
//! with `kill(pid, 0)`, which performs error checking without delivering
//! anything and needs no cooperation from the probed process.
//!
//! PID reuse between reading a record and probing it is an accepted race:
//! a recycled PID can produce a false "alive" verdict.

/// Capability: is a given PID alive on this host?
pub trait ProcessProbe {
    /// Best-effort liveness check for `pid`.
    fn is_alive(&self, pid: u32) -> bool;
}

/// Default probe backed by `kill(pid, 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KillProbe;

impl ProcessProbe for KillProbe {
    fn is_alive(&self, pid: u32) -> bool {
        is_pid_alive(pid)
    }
}

/// Check whether `pid` refers to a running process.
///
/// `ESRCH` means no such process; `EPERM` means the process exists but we
/// may not signal it, which still counts as alive. PID 0 (process group)
/// and values outside the platform's PID range are rejected outright.
pub fn is_pid_alive(pid: u32) -> bool {
    if pid == 0 || pid > i32::MAX as u32 {
        return false;
    }

    // SAFETY: signal 0 performs validity checking only; no signal is
    // delivered, so this cannot affect the probed process.
    let rc = unsafe { libc::kill(pid as libc::pid_t, 0) };
    if rc == 0 {
        return true;
    }

    std::io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}
