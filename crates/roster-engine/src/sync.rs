//! Export synchronization
//!
//! After every committed store mutation the export artifact is rebuilt from
//! a full scan: scan, build, atomic write, in that order.
//!
//! ## Ordering
//!
//! Each commit takes a ticket from a monotonically increasing counter
//! ([`Synchronizer::record_commit`]). Runs are serialized by a single-writer
//! lock which also holds the version the current artifact covers. A run reads
//! the counter *before* it scans and, once the write succeeds, stamps the
//! artifact with that value. A run whose ticket is already covered is skipped
//! as [`SyncOutcome::Superseded`], so a slow run for an older commit can never
//! replace an artifact built from a newer scan.
//!
//! ## Failure isolation
//!
//! Scan and write failures are logged, counted and kept in [`SyncStatus`];
//! they never reach the mutation that triggered the run.

#![allow(clippy::result_large_err)]

use crate::listener::MutationListener;
use chrono::{DateTime, Utc};
use roster_core::errors::{ExError, ExErrorKind};
use roster_core::model::Employee;
use roster_core::ops::RecordStore;
use roster_core::snapshot::{build_snapshot, SnapshotTable, SnapshotWriter, WrittenSnapshot};
use roster_core::{log_op_end, log_op_error, log_op_start};
use roster_store::errors::{lock_poisoned, Result};
use roster_store::export::DEFAULT_EXPORT_FILE;
use roster_store::XlsxSnapshotWriter;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Synchronizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Canonical location of the export artifact
    pub export_path: PathBuf,
    /// Write attempts per run; 1 means no retry
    pub max_write_attempts: u32,
    /// Pause between write attempts
    pub retry_backoff: Duration,
}

impl SyncConfig {
    pub fn new(export_path: impl Into<PathBuf>) -> Self {
        Self {
            export_path: export_path.into(),
            ..Self::default()
        }
    }

    pub fn with_max_write_attempts(mut self, attempts: u32) -> Self {
        self.max_write_attempts = attempts;
        self
    }

    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            max_write_attempts: 1,
            retry_backoff: Duration::from_millis(200),
        }
    }
}

/// Result of a synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A new artifact was written covering every commit up to `version`
    Written {
        version: u64,
        rows: usize,
        bytes: u64,
    },
    /// The artifact already covered the requested ticket; nothing was written
    Superseded { ticket: u64, exported_version: u64 },
}

/// Point-in-time view of synchronization health
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SyncStatus {
    /// Highest commit ticket handed out
    pub committed_version: u64,
    /// Commit ticket the current artifact covers (0 = never written)
    pub exported_version: u64,
    pub consecutive_failures: u32,
    pub total_failures: u64,
    pub last_error: Option<String>,
    pub last_success_at: Option<DateTime<Utc>>,
}

impl SyncStatus {
    /// Whether commits exist that the artifact does not reflect yet
    pub fn is_stale(&self) -> bool {
        self.exported_version < self.committed_version
    }
}

#[derive(Debug, Default)]
struct SyncHealth {
    exported_version: u64,
    consecutive_failures: u32,
    total_failures: u64,
    last_error: Option<String>,
    last_success_at: Option<DateTime<Utc>>,
}

/// Rebuilds the export artifact after store commits
pub struct Synchronizer {
    store: Arc<dyn RecordStore>,
    writer: Arc<dyn SnapshotWriter>,
    config: SyncConfig,
    commits: AtomicU64,
    // Single-writer lock; the value is the version the artifact covers.
    persisted: Mutex<u64>,
    health: Mutex<SyncHealth>,
}

impl Synchronizer {
    /// Synchronizer writing `.xlsx` workbooks to `config.export_path`
    pub fn new(store: Arc<dyn RecordStore>, config: SyncConfig) -> Self {
        let writer = Arc::new(XlsxSnapshotWriter::new(config.export_path.clone()));
        Self::with_writer(store, writer, config)
    }

    /// Synchronizer with a caller-supplied writer
    pub fn with_writer(
        store: Arc<dyn RecordStore>,
        writer: Arc<dyn SnapshotWriter>,
        config: SyncConfig,
    ) -> Self {
        Self {
            store,
            writer,
            config,
            commits: AtomicU64::new(0),
            persisted: Mutex::new(0),
            health: Mutex::new(SyncHealth::default()),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Register a committed mutation and return its ticket
    ///
    /// Must be called after the store call returned successfully.
    pub fn record_commit(&self) -> u64 {
        self.commits.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Bring the artifact up to date with the commit identified by `ticket`
    ///
    /// ## Errors
    ///
    /// - `StoreFailure`: the full scan failed (not retried)
    /// - `WriteFailure`: every write attempt failed; the previous artifact
    ///   is intact
    /// - `Concurrency`: the writer lock is poisoned
    ///
    /// Every error is also logged and recorded in [`SyncStatus`].
    pub fn synchronize(&self, ticket: u64) -> Result<SyncOutcome> {
        self.run("sync_export", Some(ticket))
    }

    /// Rebuild the artifact now, whatever the version stamps say
    ///
    /// ## Errors
    ///
    /// Same taxonomy as [`Synchronizer::synchronize`].
    pub fn rebuild(&self) -> Result<SyncOutcome> {
        self.run("rebuild_export", None)
    }

    pub fn status(&self) -> SyncStatus {
        let health = self.health();
        SyncStatus {
            committed_version: self.commits.load(Ordering::SeqCst),
            exported_version: health.exported_version,
            consecutive_failures: health.consecutive_failures,
            total_failures: health.total_failures,
            last_error: health.last_error.clone(),
            last_success_at: health.last_success_at,
        }
    }

    fn run(&self, op: &'static str, ticket: Option<u64>) -> Result<SyncOutcome> {
        log_op_start!(op, commit_ticket = ticket);
        let start = Instant::now();

        match self.run_locked(ticket) {
            Ok(outcome) => {
                match &outcome {
                    SyncOutcome::Written { version, rows, .. } => {
                        log_op_end!(
                            op,
                            duration_ms = start.elapsed().as_millis() as u64,
                            export_version = *version,
                            row_count = *rows
                        );
                    }
                    SyncOutcome::Superseded {
                        exported_version, ..
                    } => {
                        log_op_end!(
                            op,
                            duration_ms = start.elapsed().as_millis() as u64,
                            export_version = *exported_version,
                            superseded = true
                        );
                    }
                }
                Ok(outcome)
            }
            Err(err) => {
                self.record_failure(&err);
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    commit_ticket = ticket
                );
                Err(err)
            }
        }
    }

    fn run_locked(&self, ticket: Option<u64>) -> Result<SyncOutcome> {
        let mut persisted = self
            .persisted
            .lock()
            .map_err(|_| lock_poisoned("synchronize"))?;

        if let Some(ticket) = ticket {
            if *persisted >= ticket {
                return Ok(SyncOutcome::Superseded {
                    ticket,
                    exported_version: *persisted,
                });
            }
        }

        // Read before scanning: every commit counted here is visible to the scan.
        let covers = self.commits.load(Ordering::SeqCst);

        let records = self.store.scan_all().map_err(|e| {
            ExError::new(ExErrorKind::StoreFailure)
                .with_op("scan_all")
                .with_message("Full scan for export failed")
                .with_source(e)
        })?;
        let table = build_snapshot(&records);
        let written = self.write_with_retry(&table)?;

        *persisted = (*persisted).max(covers);
        self.record_success(*persisted);

        Ok(SyncOutcome::Written {
            version: *persisted,
            rows: written.rows,
            bytes: written.bytes,
        })
    }

    fn write_with_retry(&self, table: &SnapshotTable) -> Result<WrittenSnapshot> {
        let attempts = self.config.max_write_attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.writer.write(table) {
                Ok(written) => return Ok(written),
                Err(err) if attempt < attempts => {
                    tracing::warn!(
                        attempt,
                        max_attempts = attempts,
                        error = %err,
                        "Export write failed, retrying"
                    );
                    std::thread::sleep(self.config.retry_backoff);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn record_success(&self, version: u64) {
        let mut health = self.health();
        health.exported_version = version;
        health.consecutive_failures = 0;
        health.last_success_at = Some(Utc::now());
    }

    fn record_failure(&self, err: &ExError) {
        let mut health = self.health();
        health.consecutive_failures += 1;
        health.total_failures += 1;
        health.last_error = Some(err.to_string());
    }

    // Health is plain counters; a panic mid-update cannot leave it unusable.
    fn health(&self) -> MutexGuard<'_, SyncHealth> {
        self.health.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn sync_after_commit(&self) {
        let ticket = self.record_commit();
        // Failures are already logged and recorded in the status.
        let _ = self.synchronize(ticket);
    }
}

/// Inline listener: synchronizes before the mutation call returns
impl MutationListener for Synchronizer {
    fn on_employee_created(&self, _employee: &Employee) {
        self.sync_after_commit();
    }

    fn on_employee_updated(&self, _employee: &Employee) {
        self.sync_after_commit();
    }

    fn on_employee_deleted(&self, _employee_id: &str) {
        self.sync_after_commit();
    }
}
