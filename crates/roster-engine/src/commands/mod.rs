//! Command orchestration layer.
//!
//! Command functions validate input, apply it to a `RecordStore` and notify
//! the `MutationListener` once the store has committed.

pub mod employee_command;
pub mod employee_query;
