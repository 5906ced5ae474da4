use roster_core::ops::RecordStore;
use roster_engine::{MutationListener, Synchronizer};
use roster_store::ExportReader;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub listener: Arc<dyn MutationListener>,
    pub sync: Arc<Synchronizer>,
    pub reader: Arc<ExportReader>,
}

impl AppState {
    /// State whose store and export path come from `sync`
    ///
    /// `listener` receives committed mutations; in the server it is the
    /// [`SyncHandle`](crate::worker::SyncHandle) of the background worker.
    pub fn new(sync: Arc<Synchronizer>, listener: Arc<dyn MutationListener>) -> Self {
        let reader = ExportReader::new(sync.config().export_path.clone());
        Self {
            store: sync.store().clone(),
            listener,
            sync,
            reader: Arc::new(reader),
        }
    }
}
