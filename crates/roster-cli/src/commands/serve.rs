//! `roster serve`

use crate::commands::StoreArgs;
use anyhow::Context;
use clap::Args;
use roster_api::{build_router, spawn_sync_worker, AppState};
use roster_engine::Synchronizer;
use roster_store::SqliteEmployeeStore;
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Listen address
    #[arg(long, env = "ROSTER_BIND", default_value = "127.0.0.1:5000")]
    pub bind: String,
}

pub fn execute(args: ServeArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
    runtime.block_on(serve(args))
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let store = SqliteEmployeeStore::open(&args.store.db)
        .with_context(|| format!("failed to open database {}", args.store.db.display()))?;
    let sync = Arc::new(Synchronizer::new(Arc::new(store), args.store.sync_config()));
    let (sync_handle, worker) = spawn_sync_worker(sync.clone());

    let app = build_router(AppState::new(sync, Arc::new(sync_handle)));
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        db = %args.store.db.display(),
        export_path = %args.store.export_path.display(),
        "Roster listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await
        .context("server error")?;

    // The router (and with it the last SyncHandle) is gone; let queued
    // exports finish.
    worker.await.context("sync worker failed")?;
    Ok(())
}
