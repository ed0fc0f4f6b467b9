use crate::context::LockContext;
use std::path::PathBuf;
use std::process::{Child, Command};
use tempfile::TempDir;

/// Fresh lock directory plus a context pointing at it.
pub(crate) fn test_context() -> (TempDir, LockContext) {
    let temp = TempDir::new().unwrap();
    let ctx = LockContext {
        lock_dir: temp.path().to_path_buf(),
        prefix: "solo_".to_string(),
    };
    (temp, ctx)
}

/// A long-running child process standing in for "another live process".
/// Killed and reaped on drop so tests never leak children.
pub(crate) struct Sleeper(Child);

impl Sleeper {
    pub(crate) fn pid(&self) -> u32 {
        self.0.id()
    }

    /// Kill the child and wait for it, so its PID stops being alive.
    pub(crate) fn kill(mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

impl Drop for Sleeper {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

pub(crate) fn spawn_sleeper() -> Sleeper {
    let child = Command::new("sleep")
        .arg("60")
        .spawn()
        .expect("failed to spawn sleep");
    Sleeper(child)
}

/// PID of a child that has already exited and been reaped, i.e. a PID that
/// is no longer alive (barring immediate reuse, which tests accept).
pub(crate) fn reaped_child_pid() -> u32 {
    let mut child = Command::new("true")
        .spawn()
        .expect("failed to spawn true");
    let pid = child.id();
    child.wait().expect("failed to wait for child");
    pid
}

/// Write an arbitrary record file for a sanitized name.
pub(crate) fn plant_record(ctx: &LockContext, sanitized: &str, contents: &str) -> PathBuf {
    let path = ctx.record_path(sanitized);
    std::fs::write(&path, contents).unwrap();
    path
}
