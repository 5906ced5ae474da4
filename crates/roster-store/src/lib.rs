//! Roster Store - persistence for records and the export artifact
//!
//! Provides:
//! - SQLite schema with a checksummed migrations framework
//! - `SqliteEmployeeStore`, the durable `RecordStore`
//! - The export writer (workbook encoding + atomic replace)
//! - The export reader serving the current artifact

pub mod db;
pub mod errors;
pub mod export;
pub mod migrations;
pub mod repo;

// Re-export key types
pub use errors::Result;
pub use export::{ExportDownload, ExportReader, XlsxSnapshotWriter};
pub use repo::SqliteEmployeeStore;
