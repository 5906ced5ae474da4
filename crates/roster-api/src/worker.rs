//! Background export synchronization
//!
//! Handlers hand each commit ticket to one worker task over an unbounded
//! channel. The worker drains whatever is queued, keeps the highest ticket
//! and runs a single synchronization for it on the blocking pool. Lower
//! tickets are covered by that run. Processed tickets are published on a
//! watch channel so callers can wait for the export to catch up.

#![allow(clippy::result_large_err)]

use roster_core::errors::{ExError, ExErrorKind};
use roster_core::model::Employee;
use roster_engine::{MutationListener, SyncOutcome, Synchronizer};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Listener side of the worker: ticks the commit counter and enqueues
#[derive(Clone)]
pub struct SyncHandle {
    sync: Arc<Synchronizer>,
    tx: mpsc::UnboundedSender<u64>,
    processed: watch::Receiver<u64>,
}

impl SyncHandle {
    fn enqueue(&self) {
        let ticket = self.sync.record_commit();
        if self.tx.send(ticket).is_err() {
            tracing::warn!(commit_ticket = ticket, "Sync worker stopped; export not scheduled");
        }
    }

    /// Wait until every commit recorded so far has been processed
    ///
    /// "Processed" includes runs that failed; check
    /// [`Synchronizer::status`] for the outcome.
    ///
    /// ## Errors
    ///
    /// `Concurrency` if the worker has stopped.
    pub async fn flush(&self) -> Result<(), ExError> {
        let target = self.sync.status().committed_version;
        let mut processed = self.processed.clone();
        processed
            .wait_for(|done| *done >= target)
            .await
            .map(|_| ())
            .map_err(|_| {
                ExError::new(ExErrorKind::Concurrency)
                    .with_op("flush_sync")
                    .with_message("sync worker stopped")
            })
    }
}

impl MutationListener for SyncHandle {
    fn on_employee_created(&self, _employee: &Employee) {
        self.enqueue();
    }

    fn on_employee_updated(&self, _employee: &Employee) {
        self.enqueue();
    }

    fn on_employee_deleted(&self, _employee_id: &str) {
        self.enqueue();
    }
}

/// Start the worker on the current Tokio runtime
///
/// The worker stops once every `SyncHandle` has been dropped.
pub fn spawn_sync_worker(sync: Arc<Synchronizer>) -> (SyncHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (done_tx, done_rx) = watch::channel(0);
    let task = tokio::spawn(run_worker(sync.clone(), rx, done_tx));
    let handle = SyncHandle {
        sync,
        tx,
        processed: done_rx,
    };
    (handle, task)
}

async fn run_worker(
    sync: Arc<Synchronizer>,
    mut rx: mpsc::UnboundedReceiver<u64>,
    done: watch::Sender<u64>,
) {
    while let Some(first) = rx.recv().await {
        let mut ticket = first;
        while let Ok(next) = rx.try_recv() {
            ticket = ticket.max(next);
        }

        let job = sync.clone();
        match tokio::task::spawn_blocking(move || job.synchronize(ticket)).await {
            Ok(Ok(SyncOutcome::Written { version, rows, .. })) => {
                tracing::debug!(export_version = version, row_count = rows, "Export synchronized");
            }
            Ok(Ok(SyncOutcome::Superseded { .. })) => {}
            // Logged and recorded in the status by the synchronizer.
            Ok(Err(_)) => {}
            Err(join_err) => {
                tracing::error!(commit_ticket = ticket, error = %join_err, "Sync task panicked");
            }
        }

        // Tickets can arrive out of order; the watermark only moves forward.
        done.send_if_modified(|processed| {
            if ticket > *processed {
                *processed = ticket;
                true
            } else {
                false
            }
        });
    }
    tracing::debug!("Sync worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::snapshot::{SnapshotTable, SnapshotWriter, WrittenSnapshot};
    use roster_core::MemoryStore;
    use roster_engine::SyncConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingWriter {
        writes: AtomicUsize,
    }

    impl SnapshotWriter for CountingWriter {
        fn write(&self, table: &SnapshotTable) -> Result<WrittenSnapshot, ExError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(WrittenSnapshot {
                path: "employee_dataset.xlsx".into(),
                bytes: 0,
                rows: table.row_count(),
            })
        }
    }

    fn setup() -> (Arc<Synchronizer>, Arc<CountingWriter>) {
        let writer = Arc::new(CountingWriter::default());
        let sync = Arc::new(Synchronizer::with_writer(
            Arc::new(MemoryStore::new()),
            writer.clone(),
            SyncConfig::new("employee_dataset.xlsx"),
        ));
        (sync, writer)
    }

    #[tokio::test]
    async fn test_flush_survives_out_of_order_tickets() {
        let (sync, _writer) = setup();
        let (handle, _task) = spawn_sync_worker(sync.clone());

        let first = sync.record_commit();
        let second = sync.record_commit();
        handle.tx.send(second).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.tx.send(first).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        tokio::time::timeout(Duration::from_secs(2), handle.flush())
            .await
            .expect("flush timed out")
            .unwrap();
        assert_eq!(*handle.processed.borrow(), second);
        assert_eq!(sync.status().exported_version, second);
    }

    #[tokio::test]
    async fn test_queued_tickets_coalesce_into_one_run() {
        let (sync, writer) = setup();
        let (handle, _task) = spawn_sync_worker(sync.clone());

        // The worker cannot run before the first await on this runtime.
        for _ in 0..5 {
            handle.enqueue();
        }
        handle.flush().await.unwrap();

        assert_eq!(writer.writes.load(Ordering::SeqCst), 1);
        assert_eq!(sync.status().exported_version, 5);
        assert!(!sync.status().is_stale());
    }

    #[tokio::test]
    async fn test_flush_errors_once_worker_is_gone() {
        let (sync, _writer) = setup();
        let (handle, task) = spawn_sync_worker(sync.clone());
        task.abort();
        let _ = task.await;

        sync.record_commit();
        assert!(handle.flush().await.is_err());
    }
}
