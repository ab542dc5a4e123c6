use clap::Args;

use crate::sync::{
    command::{progress::ProgressLog, DEFAULT_CUTOFF_DATE},
    config::{Config, WarehouseConfig},
    error::Error,
    event_log::FileEventLog,
    service::backfill::BackfillService,
    source::mariadb::MariaDbFetcher,
    startup,
    util::time::parse_iso_date,
    warehouse::TableId,
};

#[derive(Args, Debug)]
pub struct BackfillArgs {
    /// Live rows from this date on replace legacy rows (YYYY-MM-DD).
    #[arg(long, default_value = DEFAULT_CUTOFF_DATE)]
    pub cutoff_date: String,
    /// Legacy dataset table as project.dataset.table.
    #[arg(long)]
    pub legacy_table: Option<String>,
    /// Target table as project.dataset.table, replacing the configured one.
    #[arg(long)]
    pub target_table: Option<String>,
}

pub async fn run(args: BackfillArgs) -> Result<(), Error> {
    let cutoff = parse_iso_date("cutoff_date", &args.cutoff_date)?;
    let legacy_override = args
        .legacy_table
        .as_deref()
        .map(str::parse::<TableId>)
        .transpose()?;
    let target_override = args
        .target_table
        .as_deref()
        .map(str::parse::<TableId>)
        .transpose()?;

    let config = Config::from_env()?;
    let warehouse_config = WarehouseConfig::from_env()?;
    let sources = startup::load_sources(&config)?;

    let legacy = match legacy_override {
        Some(table) => table,
        None => warehouse_config.legacy_table()?,
    };
    let target = target_override.unwrap_or_else(|| warehouse_config.target_table());

    let warehouse = startup::build_warehouse(&warehouse_config)?;
    let fetcher = MariaDbFetcher::new();
    let log = FileEventLog::new(&config.sync_log_path);
    let events = ProgressLog::new(&log, "Backfill");
    let service = BackfillService::new(&fetcher, &warehouse, &events);

    println!(
        "Backfill: merging {} before {} with live rows into {}",
        legacy, cutoff, target
    );

    let report = service.backfill(&sources, cutoff, &legacy, &target).await?;

    println!(
        "Backfill: staged {} live rows and {} reseller identities",
        report.live_rows, report.identities
    );
    println!("Backfill completed.");

    Ok(())
}
