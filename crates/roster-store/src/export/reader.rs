//! Export reader
//!
//! Serves whatever artifact is currently at the export path. The reader is
//! unaware of how stale the artifact is relative to the record store.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, Result};
use chrono::{DateTime, Utc};
use roster_core::errors::{ExError, RosterError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// MIME type of the export
pub const CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Suggested file name of the download
pub const DOWNLOAD_FILENAME: &str = "employee_dataset.xlsx";

/// A download-ready artifact
#[derive(Debug, Clone)]
pub struct ExportDownload {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub content_disposition: String,
}

/// File-level facts about the current artifact
#[derive(Debug, Clone)]
pub struct ExportInfo {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct ExportReader {
    path: PathBuf,
}

impl ExportReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current artifact in full
    ///
    /// The writer replaces the file by rename, so one read sees exactly one
    /// version.
    ///
    /// ## Errors
    ///
    /// - `ExErrorKind::NotFound`: no artifact has been written yet
    /// - `ExErrorKind::Io`: the file exists but could not be read
    pub fn open(&self) -> Result<ExportDownload> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExError::from(RosterError::ExportNotFound {
                path: self.path.display().to_string(),
            }),
            _ => io_error("read_export", e),
        })?;

        Ok(ExportDownload {
            bytes,
            content_type: CONTENT_TYPE,
            content_disposition: format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
        })
    }

    /// Size and modification time, or `None` if no artifact exists
    pub fn info(&self) -> Result<Option<ExportInfo>> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(Some(ExportInfo {
                path: self.path.clone(),
                size_bytes: meta.len(),
                modified_at: meta.modified().ok().map(DateTime::<Utc>::from),
            })),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error("stat_export", e)),
        }
    }
}
