//! SQLite repository implementation
//!
//! Persists employee records in the `employees` table

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{from_rusqlite, lock_poisoned, Result};
use crate::migrations::apply_migrations;
use roster_core::model::{new_employee_id, Employee, EmployeePatch, NewEmployee};
use roster_core::ops::{RecordStore, StoreResult};
use rusqlite::{Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SELECT_COLUMNS: &str = "id, name, email, position, department, salary";

/// SQLite-backed record store
///
/// A single connection behind a mutex: rusqlite connections are not `Sync`
/// and every operation here is short. Scan order is insertion order (`seq`).
pub struct SqliteEmployeeStore {
    conn: Mutex<Connection>,
}

impl SqliteEmployeeStore {
    /// Open (or create) the database at `path` and apply migrations
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path)?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    /// In-memory database with migrations applied
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        apply_migrations(&mut conn)?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap a connection whose schema is already migrated
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Number of records
    pub fn count(&self) -> Result<usize> {
        let conn = self.lock("count")?;
        let n: i64 = conn
            .query_row("SELECT COUNT(*) FROM employees", [], |r| r.get(0))
            .map_err(from_rusqlite)?;
        Ok(n as usize)
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| lock_poisoned(op))
    }
}

fn row_to_employee(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        position: row.get(3)?,
        department: row.get(4)?,
        salary: row.get(5)?,
    })
}

fn find(conn: &Connection, id: &str) -> rusqlite::Result<Option<Employee>> {
    conn.query_row(
        &format!("SELECT {} FROM employees WHERE id = ?1", SELECT_COLUMNS),
        [id],
        row_to_employee,
    )
    .optional()
}

impl RecordStore for SqliteEmployeeStore {
    fn insert(&self, new: NewEmployee) -> StoreResult<Employee> {
        let employee = Employee::from_new(new_employee_id(), new);
        let now = chrono::Utc::now().timestamp_millis();

        let conn = self.lock("insert")?;
        conn.execute(
            "INSERT INTO employees (id, name, email, position, department, salary, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            rusqlite::params![
                employee.id,
                employee.name,
                employee.email,
                employee.position,
                employee.department,
                employee.salary,
                now,
            ],
        )
        .map_err(|e| from_rusqlite(e).with_op("insert_employee"))?;

        tracing::debug!(employee_id = %employee.id, "Inserted employee");
        Ok(employee)
    }

    fn get(&self, id: &str) -> StoreResult<Option<Employee>> {
        let conn = self.lock("get")?;
        find(&conn, id).map_err(|e| from_rusqlite(e).with_op("get_employee"))
    }

    fn update(&self, id: &str, patch: &EmployeePatch) -> StoreResult<Option<Employee>> {
        let mut conn = self.lock("update")?;
        let tx = conn.transaction().map_err(from_rusqlite)?;

        let Some(mut employee) = find(&tx, id).map_err(from_rusqlite)? else {
            return Ok(None);
        };
        employee.apply_patch(patch);

        tx.execute(
            "UPDATE employees
             SET name = ?2, email = ?3, position = ?4, department = ?5, salary = ?6,
                 revision = revision + 1, updated_at = ?7
             WHERE id = ?1",
            rusqlite::params![
                employee.id,
                employee.name,
                employee.email,
                employee.position,
                employee.department,
                employee.salary,
                chrono::Utc::now().timestamp_millis(),
            ],
        )
        .map_err(|e| from_rusqlite(e).with_op("update_employee"))?;

        tx.commit().map_err(from_rusqlite)?;
        Ok(Some(employee))
    }

    fn delete(&self, id: &str) -> StoreResult<Option<Employee>> {
        let mut conn = self.lock("delete")?;
        let tx = conn.transaction().map_err(from_rusqlite)?;

        let existing = find(&tx, id).map_err(from_rusqlite)?;
        if existing.is_some() {
            tx.execute("DELETE FROM employees WHERE id = ?1", [id])
                .map_err(|e| from_rusqlite(e).with_op("delete_employee"))?;
            tx.commit().map_err(from_rusqlite)?;
        }
        Ok(existing)
    }

    fn scan_all(&self) -> StoreResult<Vec<Employee>> {
        let conn = self.lock("scan_all")?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM employees ORDER BY seq",
                SELECT_COLUMNS
            ))
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], row_to_employee)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite(e).with_op("scan_all"))?;
        Ok(rows)
    }
}
