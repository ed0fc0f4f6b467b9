//! On-disk lock records.
//!
//! A record is the entire persisted state of one named lock: a plain text
//! file whose whole contents are the owner's PID as a decimal string. No
//! other metadata, no checksum, no versioning. There is no in-memory
//! registry either; every acquisition attempt derives its view from disk.

use crate::error::{Result, SoloError};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// What a record file says about a named lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// No record file exists.
    Absent,
    /// A record exists but its contents are not a PID. Treated like a stale
    /// record: the previous writer is gone or never finished.
    Invalid,
    /// A record exists and names this PID as the owner. Whether the owner
    /// is still alive is the liveness probe's question, not the record's.
    Owned(u32),
}

/// Read the record at `path`.
///
/// Absence and unparseable contents are ordinary protocol states, not
/// errors; only real I/O problems (permissions and the like) fail.
pub fn read(path: &Path) -> Result<RecordState> {
    match fs::read_to_string(path) {
        Ok(contents) => match contents.trim().parse::<u32>() {
            Ok(pid) if pid > 0 => Ok(RecordState::Owned(pid)),
            _ => Ok(RecordState::Invalid),
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(RecordState::Absent),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Ok(RecordState::Invalid),
        Err(e) => Err(SoloError::Io(format!(
            "failed to read lock record '{}': {}",
            path.display(),
            e
        ))),
    }
}

/// Write `pid` as the record at `path`, creating the file or truncating
/// whatever was there.
///
/// Only ever called with the gate held.
pub fn write(path: &Path, pid: u32) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            SoloError::Io(format!(
                "failed to write lock record '{}': {}",
                path.display(),
                e
            ))
        })?;

    file.write_all(pid.to_string().as_bytes()).map_err(|e| {
        SoloError::Io(format!(
            "failed to write lock record '{}': {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().map_err(|e| {
        SoloError::Io(format!(
            "failed to sync lock record '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Delete the record at `path`. Idempotent: an already-absent record is
/// success (`Ok(false)`).
pub fn remove(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SoloError::Io(format!(
            "failed to remove lock record '{}': {}",
            path.display(),
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_context;

    #[test]
    fn absent_record_reads_as_absent() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("missing");
        assert_eq!(read(&path).unwrap(), RecordState::Absent);
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("mine");

        write(&path, 4242).unwrap();
        assert_eq!(read(&path).unwrap(), RecordState::Owned(4242));

        // Contents are exactly the decimal PID, nothing else.
        assert_eq!(fs::read_to_string(&path).unwrap(), "4242");
    }

    #[test]
    fn write_overwrites_existing_record() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("mine");

        write(&path, 111111).unwrap();
        write(&path, 7).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "7");
    }

    #[test]
    fn garbage_contents_read_as_invalid() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("garbage");

        fs::write(&path, "not a pid").unwrap();
        assert_eq!(read(&path).unwrap(), RecordState::Invalid);

        fs::write(&path, "").unwrap();
        assert_eq!(read(&path).unwrap(), RecordState::Invalid);

        fs::write(&path, "-12").unwrap();
        assert_eq!(read(&path).unwrap(), RecordState::Invalid);

        fs::write(&path, "0").unwrap();
        assert_eq!(read(&path).unwrap(), RecordState::Invalid);
    }

    #[test]
    fn trailing_whitespace_is_tolerated() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("padded");

        fs::write(&path, "4242\n").unwrap();
        assert_eq!(read(&path).unwrap(), RecordState::Owned(4242));
    }

    #[test]
    fn remove_is_idempotent() {
        let (_temp, ctx) = test_context();
        let path = ctx.record_path("gone");

        write(&path, 1).unwrap();
        assert!(remove(&path).unwrap());
        assert!(!remove(&path).unwrap());
        assert_eq!(read(&path).unwrap(), RecordState::Absent);
    }
}
