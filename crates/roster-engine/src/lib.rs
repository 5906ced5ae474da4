//! Roster Engine - Orchestration layer
//!
//! Coordinates the record store with the export artifact:
//! - Employee commands that mutate the store and notify a listener on commit
//! - The `Synchronizer`, which rebuilds the export after each commit under a
//!   single-writer lock with version stamps

pub mod commands;
pub mod listener;
pub mod sync;

pub use commands::employee_command::{
    apply_employee_command, EmployeeCommand, EmployeeCommandResult,
};
pub use commands::employee_query::{employee_get, employee_list};
pub use listener::{MutationListener, NoopListener};
pub use sync::{SyncConfig, SyncOutcome, SyncStatus, Synchronizer};
