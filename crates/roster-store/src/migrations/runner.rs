//! Migration runner
//!
//! Reads the ledger of applied migrations once, verifies every recorded
//! checksum against the embedded SQL, then applies whatever is pending, each
//! in its own transaction.

#![allow(clippy::result_large_err)]

use crate::errors::{checksum_mismatch, from_rusqlite, migration_error, Result};
use crate::migrations::checksums::compute_checksum;
use crate::migrations::embedded::{get_migrations, Migration};
use rusqlite::Connection;
use std::collections::HashMap;

const LEDGER_DDL: &str = "CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY,
    migration_id TEXT NOT NULL UNIQUE,
    applied_at INTEGER NOT NULL,
    checksum TEXT
)";

/// Bring the schema up to date
///
/// # Errors
/// `StoreFailure` when a migration fails to apply or an already-applied
/// migration's SQL no longer matches its recorded checksum.
pub fn apply_migrations(conn: &mut Connection) -> Result<()> {
    conn.execute(LEDGER_DDL, []).map_err(from_rusqlite)?;
    let applied = read_ledger(conn)?;

    for migration in get_migrations() {
        let checksum = compute_checksum(migration.sql);
        match applied.get(migration.id) {
            Some(Some(recorded)) if *recorded != checksum => {
                return Err(checksum_mismatch(migration.id, recorded, &checksum));
            }
            Some(_) => continue,
            None => apply_one(conn, &migration, &checksum)?,
        }
    }

    Ok(())
}

/// migration id -> recorded checksum (NULL for legacy rows)
fn read_ledger(conn: &Connection) -> Result<HashMap<String, Option<String>>> {
    let mut stmt = conn
        .prepare("SELECT migration_id, checksum FROM schema_version")
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(from_rusqlite)?;
    rows.collect::<rusqlite::Result<HashMap<_, _>>>()
        .map_err(from_rusqlite)
}

fn apply_one(conn: &mut Connection, migration: &Migration, checksum: &str) -> Result<()> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    tx.execute_batch(migration.sql)
        .map_err(|e| migration_error(migration.id, &e.to_string()))?;
    tx.execute(
        "INSERT INTO schema_version (migration_id, applied_at, checksum) VALUES (?1, ?2, ?3)",
        rusqlite::params![migration.id, chrono::Utc::now().timestamp(), checksum],
    )
    .map_err(from_rusqlite)?;
    tx.commit().map_err(from_rusqlite)?;

    tracing::debug!(migration_id = migration.id, "Applied migration");
    Ok(())
}
