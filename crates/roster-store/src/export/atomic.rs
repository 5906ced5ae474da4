//! Atomic write primitives
//!
//! Uses temp→rename so that readers never observe a partial artifact

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Atomically replace `target_path` with `content`
///
/// The temp file lives in the target's directory so the final rename stays
/// on one filesystem. If any step fails the temp file is removed on drop and
/// the existing target is untouched.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = target_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| io_error("create_export_dir", e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".export-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| io_error("create_export_temp", e))?;

    temp.write_all(content)
        .map_err(|e| io_error("write_export_temp", e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| io_error("sync_export_temp", e))?;

    temp.persist(target_path)
        .map_err(|e| io_error("rename_export_temp", e.error))?;

    Ok(())
}
