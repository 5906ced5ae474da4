use std::path::PathBuf;

use crate::errors::ExError;
use crate::snapshot::builder::SnapshotTable;

/// What a successful export write produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSnapshot {
    pub path: PathBuf,
    pub bytes: u64,
    pub rows: usize,
}

/// Persists a snapshot table to the export location
///
/// Implementations must replace the previous artifact atomically: a reader
/// sees either the old file or the new one, never a mixture. On failure the
/// previous artifact must be left intact and the error must carry
/// `ExErrorKind::WriteFailure`.
pub trait SnapshotWriter: Send + Sync {
    fn write(&self, table: &SnapshotTable) -> Result<WrittenSnapshot, ExError>;
}
