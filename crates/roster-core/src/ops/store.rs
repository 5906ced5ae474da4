use crate::errors::ExError;
use crate::model::{Employee, EmployeePatch, NewEmployee};

/// Result type for record store operations
pub type StoreResult<T> = std::result::Result<T, ExError>;

/// Durable collection of employee records
///
/// The store is an opaque CRUD collaborator of the export synchronizer; the
/// only property synchronization relies on is that `scan_all` returns every
/// committed record. Implementations return records in a stable scan order
/// (insertion order for the bundled ones).
///
/// Inputs reaching `insert`/`update` have already been validated. Missing
/// ids are reported as `Ok(None)`, never as errors; errors are store
/// failures (`ExErrorKind::StoreFailure`).
pub trait RecordStore: Send + Sync {
    /// Insert a new record and return it with its store-assigned id
    fn insert(&self, new: NewEmployee) -> StoreResult<Employee>;

    /// Point lookup by id
    fn get(&self, id: &str) -> StoreResult<Option<Employee>>;

    /// Apply a patch to the record with the given id
    fn update(&self, id: &str, patch: &EmployeePatch) -> StoreResult<Option<Employee>>;

    /// Delete by id, returning the removed record
    fn delete(&self, id: &str) -> StoreResult<Option<Employee>>;

    /// Every record currently in the store, in scan order
    fn scan_all(&self) -> StoreResult<Vec<Employee>>;
}
