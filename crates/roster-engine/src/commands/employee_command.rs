//! Employee mutation commands with boundary logging.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for mutations:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Stores log internal details at `debug` only.

#![allow(clippy::result_large_err)]

use crate::listener::MutationListener;
use roster_core::errors::{ExError, RosterError};
use roster_core::model::{Employee, EmployeePatch, NewEmployee};
use roster_core::ops::RecordStore;
use roster_core::rules::validation::{validate_new_employee, validate_patch};
use roster_core::{log_op_end, log_op_error, log_op_start};
use roster_store::errors::Result;

/// Store mutations
#[derive(Debug, Clone)]
pub enum EmployeeCommand {
    /// Create a new employee; the store assigns the id.
    Create(NewEmployee),
    /// Patch an existing employee.
    Update { id: String, patch: EmployeePatch },
    /// Remove an employee.
    Delete { id: String },
}

impl EmployeeCommand {
    fn op_name(&self) -> &'static str {
        match self {
            EmployeeCommand::Create(_) => "employee_create",
            EmployeeCommand::Update { .. } => "employee_update",
            EmployeeCommand::Delete { .. } => "employee_delete",
        }
    }
}

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub enum EmployeeCommandResult {
    Created(Employee),
    Updated(Employee),
    /// The record as it was before deletion
    Deleted(Employee),
}

impl EmployeeCommandResult {
    pub fn employee(&self) -> &Employee {
        match self {
            EmployeeCommandResult::Created(e)
            | EmployeeCommandResult::Updated(e)
            | EmployeeCommandResult::Deleted(e) => e,
        }
    }
}

/// Apply a command to the store and notify `listener` on commit
///
/// The listener runs only after the store call succeeded. Nothing it does
/// can change the returned result.
///
/// ## Errors
///
/// - `InvalidInput`: name or email missing/blank, or non-finite salary;
///   the store is not touched
/// - `NotFound`: update or delete of an unknown id
/// - `StoreFailure`: the store mutation failed; the listener is not called
pub fn apply_employee_command(
    cmd: EmployeeCommand,
    store: &dyn RecordStore,
    listener: &dyn MutationListener,
) -> Result<EmployeeCommandResult> {
    let op = cmd.op_name();
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = apply_impl(cmd, store).map_err(|e| {
        log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        employee_id = %result.employee().id
    );

    match &result {
        EmployeeCommandResult::Created(e) => listener.on_employee_created(e),
        EmployeeCommandResult::Updated(e) => listener.on_employee_updated(e),
        EmployeeCommandResult::Deleted(e) => listener.on_employee_deleted(&e.id),
    }

    Ok(result)
}

fn apply_impl(cmd: EmployeeCommand, store: &dyn RecordStore) -> Result<EmployeeCommandResult> {
    match cmd {
        EmployeeCommand::Create(new) => {
            validate_new_employee(&new).map_err(ExError::from)?;
            store.insert(new).map(EmployeeCommandResult::Created)
        }
        EmployeeCommand::Update { id, patch } => {
            validate_patch(&patch).map_err(ExError::from)?;
            store
                .update(&id, &patch)?
                .map(EmployeeCommandResult::Updated)
                .ok_or_else(|| not_found(id))
        }
        EmployeeCommand::Delete { id } => store
            .delete(&id)?
            .map(EmployeeCommandResult::Deleted)
            .ok_or_else(|| not_found(id)),
    }
}

pub(crate) fn not_found(id: String) -> ExError {
    RosterError::EmployeeNotFound { employee_id: id }.into()
}
