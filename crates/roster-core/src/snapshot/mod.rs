//! Export snapshot model
//!
//! The snapshot is the tabular form of the whole record store. Building it
//! is a pure transform; writing it is delegated to a `SnapshotWriter`.

pub mod builder;
pub mod writer;

pub use builder::{build_snapshot, Cell, SnapshotTable, COLUMNS, SHEET_NAME};
pub use writer::{SnapshotWriter, WrittenSnapshot};
