#![allow(dead_code)]

use calamine::{open_workbook, Data, Reader, Xlsx};
use roster_core::errors::{ExError, ExErrorKind};
use roster_core::model::{Employee, EmployeePatch, NewEmployee};
use roster_core::ops::{MemoryStore, RecordStore, StoreResult};
use roster_core::snapshot::{SnapshotTable, SnapshotWriter, WrittenSnapshot};
use roster_engine::{MutationListener, SyncConfig, Synchronizer};
use roster_store::XlsxSnapshotWriter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// The canonical example record
pub fn ana() -> NewEmployee {
    NewEmployee::new("Ana", "ana@x.com")
        .with_position("Engineer")
        .with_department("R&D")
        .with_salary(90000.0)
}

pub fn export_path(dir: &TempDir) -> PathBuf {
    dir.path().join("employee_dataset.xlsx")
}

/// Memory store + xlsx synchronizer writing into a fresh temp dir
pub fn setup_sync() -> (TempDir, Arc<MemoryStore>, Synchronizer) {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(MemoryStore::new());
    let sync = Synchronizer::new(store.clone(), SyncConfig::new(export_path(&temp_dir)));
    (temp_dir, store, sync)
}

/// All rows of the Employees sheet, header included
pub fn read_sheet(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range("Employees").unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => (*i as f64).to_string(),
        other => other.to_string(),
    }
}

fn record_key(employee: &Employee) -> Vec<String> {
    vec![
        employee.name.clone(),
        employee.email.clone(),
        employee.position.clone().unwrap_or_default(),
        employee.department.clone().unwrap_or_default(),
        employee.salary.map(|s| s.to_string()).unwrap_or_default(),
    ]
}

/// Data rows of the artifact as sorted string tuples
pub fn artifact_rows(path: &Path) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = read_sheet(path)
        .iter()
        .skip(1)
        .map(|r| {
            let mut row: Vec<String> = r.iter().map(cell_text).collect();
            row.resize(5, String::new());
            row
        })
        .collect();
    rows.sort();
    rows
}

/// Store content in the same shape as [`artifact_rows`]
pub fn store_rows(store: &dyn RecordStore) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = store.scan_all().unwrap().iter().map(record_key).collect();
    rows.sort();
    rows
}

/// Listener that records which callbacks fired
#[derive(Default)]
pub struct RecordingListener {
    pub events: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl MutationListener for RecordingListener {
    fn on_employee_created(&self, employee: &Employee) {
        self.events.lock().unwrap().push(format!("created:{}", employee.id));
    }

    fn on_employee_updated(&self, employee: &Employee) {
        self.events.lock().unwrap().push(format!("updated:{}", employee.id));
    }

    fn on_employee_deleted(&self, employee_id: &str) {
        self.events.lock().unwrap().push(format!("deleted:{}", employee_id));
    }
}

fn store_failure(op: &str) -> ExError {
    ExError::new(ExErrorKind::StoreFailure)
        .with_op(op.to_string())
        .with_message("disk I/O error")
}

/// Store wrapper whose mutations or scans can be switched to fail
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_mutations: AtomicBool,
    pub fail_scans: AtomicBool,
}

impl RecordStore for FlakyStore {
    fn insert(&self, new: NewEmployee) -> StoreResult<Employee> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(store_failure("insert_employee"));
        }
        self.inner.insert(new)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Employee>> {
        self.inner.get(id)
    }

    fn update(&self, id: &str, patch: &EmployeePatch) -> StoreResult<Option<Employee>> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(store_failure("update_employee"));
        }
        self.inner.update(id, patch)
    }

    fn delete(&self, id: &str) -> StoreResult<Option<Employee>> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(store_failure("delete_employee"));
        }
        self.inner.delete(id)
    }

    fn scan_all(&self) -> StoreResult<Vec<Employee>> {
        if self.fail_scans.load(Ordering::SeqCst) {
            return Err(store_failure("scan_all"));
        }
        self.inner.scan_all()
    }
}

/// Xlsx writer that fails its next `failures_left` writes
pub struct FlakyWriter {
    pub inner: XlsxSnapshotWriter,
    pub failures_left: AtomicUsize,
    pub attempts: AtomicUsize,
}

impl FlakyWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: XlsxSnapshotWriter::new(path),
            failures_left: AtomicUsize::new(0),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn fail_next(&self, n: usize) {
        self.failures_left.store(n, Ordering::SeqCst);
    }
}

impl SnapshotWriter for FlakyWriter {
    fn write(&self, table: &SnapshotTable) -> Result<WrittenSnapshot, ExError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let fail = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if fail {
            return Err(ExError::new(ExErrorKind::WriteFailure)
                .with_op("write_export")
                .with_message("No space left on device"));
        }
        self.inner.write(table)
    }
}
