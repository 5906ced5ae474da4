//! Export artifact persistence
//!
//! Provides:
//! - Workbook encoding of a `SnapshotTable`
//! - Atomic temp→rename replacement of the artifact
//! - The writer used by the synchronizer and the reader used for downloads

mod atomic;
pub mod reader;
pub mod workbook;
pub mod writer;

pub use reader::{ExportDownload, ExportInfo, ExportReader, CONTENT_TYPE, DOWNLOAD_FILENAME};
pub use workbook::encode_workbook;
pub use writer::XlsxSnapshotWriter;

/// Default file name of the export artifact
pub const DEFAULT_EXPORT_FILE: &str = "employee_dataset.xlsx";
