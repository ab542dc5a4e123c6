use std::time::Instant;

use clap::{Args, ValueEnum};

use crate::sync::{
    command::{non_zero, progress::ProgressLog},
    config::{Config, WarehouseConfig},
    error::Error,
    event_log::FileEventLog,
    service::warehouse_sync::{FullSyncOptions, WarehouseSyncService},
    source::mariadb::MariaDbFetcher,
    startup,
    util::time::format_elapsed,
    warehouse::WriteDisposition,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DispositionArg {
    /// Replace the table contents.
    #[default]
    Truncate,
    /// Add rows to the table.
    Append,
}

impl From<DispositionArg> for WriteDisposition {
    fn from(value: DispositionArg) -> Self {
        match value {
            DispositionArg::Truncate => WriteDisposition::Truncate,
            DispositionArg::Append => WriteDisposition::Append,
        }
    }
}

#[derive(Args, Debug)]
pub struct SyncWarehouseArgs {
    /// Row limit per source (0 = no limit).
    #[arg(long, default_value_t = 0)]
    pub limit: u64,
    /// Only rows created in the last N days (0 = all rows).
    #[arg(long, default_value_t = 0)]
    pub days: u32,
    #[arg(long, value_enum, default_value_t = DispositionArg::Truncate)]
    pub write_disposition: DispositionArg,
    /// Mark the run as scheduled.
    #[arg(long)]
    pub auto: bool,
}

pub async fn run(args: SyncWarehouseArgs) -> Result<(), Error> {
    let config = Config::from_env()?;
    let warehouse_config = WarehouseConfig::from_env()?;
    let sources = startup::load_sources(&config)?;
    let target = warehouse_config.target_table();

    let warehouse = startup::build_warehouse(&warehouse_config)?;
    let fetcher = MariaDbFetcher::new();
    let log = FileEventLog::new(&config.sync_log_path);
    let events = ProgressLog::new(&log, "Warehouse sync");
    let service = WarehouseSyncService::new(&fetcher, &warehouse, &events, &target);

    println!(
        "Warehouse sync: starting ({} source(s), target={})",
        sources.len(),
        target
    );

    let started = Instant::now();
    let options = FullSyncOptions {
        row_limit: non_zero(args.limit),
        days: non_zero(args.days),
        disposition: args.write_disposition.into(),
        auto: args.auto,
    };
    let report = service.sync_full(&sources, &options).await?;

    if report.rows == 0 {
        println!("No rows fetched from any source; nothing loaded.");
    } else {
        println!(
            "Loaded {} rows into {} in {}",
            report.rows,
            report.target,
            format_elapsed(started.elapsed())
        );
    }

    Ok(())
}
