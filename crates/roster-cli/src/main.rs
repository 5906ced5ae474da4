//! Roster CLI
//!
//! Runs the HTTP service and operates on the export artifact

use clap::{Parser, Subcommand};
use roster_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "roster")]
#[command(about = "Roster - employee records with a spreadsheet export", long_about = None)]
struct Cli {
    /// Log output format: pretty or json
    #[arg(long, env = "ROSTER_LOG_FORMAT", default_value = "pretty", global = true)]
    log_format: Profile,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve(commands::serve::ServeArgs),
    /// Export artifact operations
    Export(commands::export::ExportArgs),
}

fn main() {
    // A missing .env file is fine
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init(cli.log_format);

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args),
        Commands::Export(args) => commands::export::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
