//! Lock naming.
//!
//! A lock's logical name is any human-chosen string; its filesystem identity
//! is the sanitized form. Sanitization is a pure character map, so two
//! distinct names that sanitize identically share one lock. That collision
//! is a documented limitation, not corrected here.

use crate::error::{Result, SoloError};

/// Replace every character outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Default lock name for "one instance of this program": the path of the
/// current executable.
///
/// Callers that want a different scope pass an explicit name instead; there
/// is no call-stack inspection.
pub fn current_exe_name() -> Result<String> {
    let exe = std::env::current_exe().map_err(|e| {
        SoloError::Io(format!("failed to resolve current executable path: {}", e))
    })?;
    Ok(exe.to_string_lossy().into_owned())
}
