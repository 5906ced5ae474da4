//! Snapshot writer for the `.xlsx` export

#![allow(clippy::result_large_err)]

use crate::errors::write_failure;
use crate::export::atomic::atomic_write;
use crate::export::workbook::encode_workbook;
use roster_core::errors::ExError;
use roster_core::snapshot::{SnapshotTable, SnapshotWriter, WrittenSnapshot};
use std::path::{Path, PathBuf};

/// Writes the export workbook to a fixed path by atomic replace
#[derive(Debug, Clone)]
pub struct XlsxSnapshotWriter {
    path: PathBuf,
}

impl XlsxSnapshotWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotWriter for XlsxSnapshotWriter {
    /// Encode and atomically replace the artifact
    ///
    /// ## Errors
    ///
    /// - `ExErrorKind::WriteFailure`: encoding, temp write or rename failed;
    ///   the source error carries the detail. The previous artifact is intact.
    fn write(&self, table: &SnapshotTable) -> Result<WrittenSnapshot, ExError> {
        let bytes = encode_workbook(table).map_err(|e| write_failure(&self.path, e))?;
        atomic_write(&self.path, &bytes).map_err(|e| write_failure(&self.path, e))?;

        tracing::debug!(
            path = %self.path.display(),
            size_bytes = bytes.len(),
            row_count = table.row_count(),
            "Replaced export artifact"
        );

        Ok(WrittenSnapshot {
            path: self.path.clone(),
            bytes: bytes.len() as u64,
            rows: table.row_count(),
        })
    }
}
