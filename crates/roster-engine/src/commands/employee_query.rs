//! Read-only employee queries

#![allow(clippy::result_large_err)]

use crate::commands::employee_command::not_found;
use roster_core::model::Employee;
use roster_core::ops::RecordStore;
use roster_store::errors::Result;

/// Fetch one employee
///
/// ## Errors
///
/// - `NotFound`: no record with this id
/// - `StoreFailure`: the lookup failed
pub fn employee_get(store: &dyn RecordStore, id: &str) -> Result<Employee> {
    store.get(id)?.ok_or_else(|| not_found(id.to_string()))
}

/// Every employee in scan order
///
/// ## Errors
///
/// - `StoreFailure`: the scan failed
pub fn employee_list(store: &dyn RecordStore) -> Result<Vec<Employee>> {
    store.scan_all()
}
