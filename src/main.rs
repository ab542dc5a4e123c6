use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use isp_report_sync::sync::{
    command::{
        backfill::{self, BackfillArgs},
        logs::{self, LogsArgs},
        sync_cache::{self, SyncCacheArgs},
        sync_warehouse::{self, SyncWarehouseArgs},
        sync_window::{self, SyncWindowArgs},
    },
    error::Error,
};

#[derive(Parser, Debug)]
#[command(name = "isp-report-sync", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replace the cached permission reference tables with a fresh copy from each source.
    SyncCache(SyncCacheArgs),
    /// Load all user service rows of every source into the warehouse table.
    SyncWarehouse(SyncWarehouseArgs),
    /// Replace a date window of the warehouse table through a stage table.
    SyncWindow(SyncWindowArgs),
    /// Rebuild the warehouse table from legacy rows and live rows around a cutoff date.
    Backfill(BackfillArgs),
    /// Print the most recent sync events.
    Logs(LogsArgs),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        tracing::error!("{}", e);
        println!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<(), Error> {
    match command {
        Command::SyncCache(args) => sync_cache::run(args).await,
        Command::SyncWarehouse(args) => sync_warehouse::run(args).await,
        Command::SyncWindow(args) => sync_window::run(args).await,
        Command::Backfill(args) => backfill::run(args).await,
        Command::Logs(args) => logs::run(args).await,
    }
}
