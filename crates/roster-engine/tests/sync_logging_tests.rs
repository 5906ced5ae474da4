// Sync failures must be observable through the canonical error event

mod common;

use common::{export_path, FlakyWriter};
use roster_core::logging_facility::test_capture::init_test_capture;
use roster_core::ops::MemoryStore;
use roster_engine::{SyncConfig, Synchronizer};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_sync_lifecycle_and_failure_are_logged() {
    let capture = init_test_capture();
    let temp_dir = TempDir::new().unwrap();
    let path = export_path(&temp_dir);
    let writer = Arc::new(FlakyWriter::new(&path));
    let sync = Synchronizer::with_writer(
        Arc::new(MemoryStore::new()),
        writer.clone(),
        SyncConfig::new(&path),
    );

    let ticket = sync.record_commit();
    sync.synchronize(ticket).unwrap();

    capture.assert_event_exists("sync_export", "start");
    let ends = capture.events_for("sync_export", "end");
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field("export_version"), Some("1"));
    assert_eq!(ends[0].field("row_count"), Some("0"));

    writer.fail_next(1);
    sync.rebuild().unwrap_err();

    let errors = capture.events_for("rebuild_export", "end_error");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field("err.code"), Some("ERR_WRITE_FAILURE"));
    assert_eq!(errors[0].level, tracing::Level::ERROR);
}
