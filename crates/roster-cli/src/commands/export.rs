//! `roster export` operator commands

use crate::commands::StoreArgs;
use anyhow::Context;
use clap::{Args, Subcommand};
use roster_engine::{SyncOutcome, Synchronizer};
use roster_store::{ExportReader, SqliteEmployeeStore};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(subcommand)]
    pub command: ExportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Rebuild the workbook from the database now
    ///
    /// Runs outside any `roster serve` process. Stop the server first, or a
    /// server sync still in flight may overwrite the rebuilt workbook with an
    /// older scan.
    Rebuild(StoreArgs),
    /// Show whether the workbook exists and its size
    Status(StoreArgs),
}

pub fn execute(args: ExportArgs) -> anyhow::Result<()> {
    match args.command {
        ExportCommand::Rebuild(store) => execute_rebuild(store),
        ExportCommand::Status(store) => execute_status(store),
    }
}

fn execute_rebuild(args: StoreArgs) -> anyhow::Result<()> {
    let store = SqliteEmployeeStore::open(&args.db)
        .with_context(|| format!("failed to open database {}", args.db.display()))?;
    let sync = Synchronizer::new(Arc::new(store), args.sync_config());

    match sync.rebuild()? {
        SyncOutcome::Written { rows, bytes, .. } => {
            println!(
                "Exported {} employees to {} ({} bytes)",
                rows,
                args.export_path.display(),
                bytes
            );
        }
        // rebuild never checks stamps
        SyncOutcome::Superseded { .. } => {}
    }
    Ok(())
}

fn execute_status(args: StoreArgs) -> anyhow::Result<()> {
    match ExportReader::new(&args.export_path).info()? {
        Some(info) => {
            println!("Export: {}", info.path.display());
            println!("Size: {} bytes", info.size_bytes);
            if let Some(modified) = info.modified_at {
                println!("Modified: {}", modified.to_rfc3339());
            }
        }
        None => println!("No export at {}", args.export_path.display()),
    }
    Ok(())
}
