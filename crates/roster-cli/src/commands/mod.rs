pub mod export;
pub mod serve;

use clap::Args;
use roster_engine::SyncConfig;
use roster_store::export::DEFAULT_EXPORT_FILE;
use std::path::PathBuf;
use std::time::Duration;

/// Locations and sync tuning shared by every command
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// SQLite database path
    #[arg(long, env = "ROSTER_DB", default_value = "roster.db")]
    pub db: PathBuf,

    /// Location of the exported workbook
    #[arg(long, env = "ROSTER_EXPORT_PATH", default_value = DEFAULT_EXPORT_FILE)]
    pub export_path: PathBuf,

    /// Write attempts per synchronization (1 = no retry)
    #[arg(long, env = "ROSTER_WRITE_ATTEMPTS", default_value_t = 1)]
    pub write_attempts: u32,

    /// Pause between write attempts, in milliseconds
    #[arg(long, env = "ROSTER_RETRY_BACKOFF_MS", default_value_t = 200)]
    pub retry_backoff_ms: u64,
}

impl StoreArgs {
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::new(&self.export_path)
            .with_max_write_attempts(self.write_attempts)
            .with_retry_backoff(Duration::from_millis(self.retry_backoff_ms))
    }
}
