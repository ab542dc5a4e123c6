use std::time::Instant;

use clap::Args;

use crate::sync::{
    command::{non_zero, progress::ProgressLog, DEFAULT_CUTOFF_DATE},
    config::{Config, WarehouseConfig},
    error::Error,
    event_log::FileEventLog,
    service::warehouse_sync::{WarehouseSyncService, WindowSyncOptions},
    source::mariadb::MariaDbFetcher,
    startup,
    util::time::{format_elapsed, parse_window},
    warehouse::TableId,
};

#[derive(Args, Debug)]
pub struct SyncWindowArgs {
    /// First day of the window (YYYY-MM-DD, inclusive).
    #[arg(long, default_value = DEFAULT_CUTOFF_DATE)]
    pub start_date: String,
    /// Last day of the window (YYYY-MM-DD, inclusive). Open-ended when omitted.
    #[arg(long)]
    pub end_date: Option<String>,
    /// Row limit per source (0 = no limit).
    #[arg(long, default_value_t = 0)]
    pub limit: u64,
    /// Target table as project.dataset.table, replacing the configured one.
    #[arg(long)]
    pub target_table: Option<String>,
}

pub async fn run(args: SyncWindowArgs) -> Result<(), Error> {
    let (start_date, end_date) = parse_window(&args.start_date, args.end_date.as_deref())?;
    let target_override = args
        .target_table
        .as_deref()
        .map(str::parse::<TableId>)
        .transpose()?;

    let config = Config::from_env()?;
    let warehouse_config = WarehouseConfig::from_env()?;
    let sources = startup::load_sources(&config)?;
    let target = warehouse_config.target_table();

    let warehouse = startup::build_warehouse(&warehouse_config)?;
    let fetcher = MariaDbFetcher::new();
    let log = FileEventLog::new(&config.sync_log_path);
    let events = ProgressLog::new(&log, "Window sync");
    let service = WarehouseSyncService::new(&fetcher, &warehouse, &events, &target);

    println!(
        "Window sync: starting (start={}, end={})",
        start_date,
        end_date.map_or_else(|| "open".to_string(), |end| end.to_string())
    );

    let started = Instant::now();
    let options = WindowSyncOptions {
        start_date,
        end_date,
        row_limit: non_zero(args.limit),
        target: target_override,
    };
    let report = service.sync_window(&sources, &options).await?;

    if report.rows == 0 {
        println!("Window sync: no rows fetched; target left unchanged.");
    } else {
        println!(
            "Synced {} rows into {} in {}",
            report.rows,
            report.target,
            format_elapsed(started.elapsed())
        );
    }

    Ok(())
}
