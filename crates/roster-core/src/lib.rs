//! Roster Core - employee records and the export snapshot model
//!
//! This crate provides:
//! - The `Employee` model with creation and patch payloads
//! - Validation rules for the record invariants
//! - The `RecordStore` trait and an in-memory implementation
//! - The pure snapshot builder that turns a full scan into an export table
//! - The error and logging facilities shared by every Roster crate

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;
pub mod snapshot;

// Used by the logging macros; callers need not depend on the types crate.
pub use roster_core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, RosterError};
pub use model::{Employee, EmployeePatch, NewEmployee};
pub use ops::{MemoryStore, RecordStore, StoreResult};
pub use snapshot::{build_snapshot, Cell, SnapshotTable, SnapshotWriter, WrittenSnapshot};
