//! Repository layer
//!
//! Bridges the roster-core `RecordStore` contract to SQLite

pub mod sqlite_repo;

pub use sqlite_repo::SqliteEmployeeStore;
