use std::sync::{Mutex, MutexGuard};

use crate::errors::{ExError, ExErrorKind};
use crate::model::{new_employee_id, Employee, EmployeePatch, NewEmployee};
use crate::ops::store::{RecordStore, StoreResult};

/// In-memory record store
///
/// A `Vec` behind a mutex; scan order is insertion order. Used by tests and
/// by embedders that do not need durability.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Employee>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records
    ///
    /// # Errors
    /// `Concurrency` if a writer panicked while holding the lock.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.lock("len")?.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.lock("is_empty")?.is_empty())
    }

    fn lock(&self, op: &str) -> StoreResult<MutexGuard<'_, Vec<Employee>>> {
        self.records.lock().map_err(|_| {
            ExError::new(ExErrorKind::Concurrency)
                .with_op(op.to_string())
                .with_message("memory store lock poisoned")
        })
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, new: NewEmployee) -> StoreResult<Employee> {
        let employee = Employee::from_new(new_employee_id(), new);
        self.lock("insert")?.push(employee.clone());
        Ok(employee)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.lock("get")?.iter().find(|e| e.id == id).cloned())
    }

    fn update(&self, id: &str, patch: &EmployeePatch) -> StoreResult<Option<Employee>> {
        let mut records = self.lock("update")?;
        Ok(records.iter_mut().find(|e| e.id == id).map(|e| {
            e.apply_patch(patch);
            e.clone()
        }))
    }

    fn delete(&self, id: &str) -> StoreResult<Option<Employee>> {
        let mut records = self.lock("delete")?;
        Ok(records
            .iter()
            .position(|e| e.id == id)
            .map(|idx| records.remove(idx)))
    }

    fn scan_all(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.lock("scan_all")?.clone())
    }
}
