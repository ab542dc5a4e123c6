use std::time::Instant;

use clap::Args;

use crate::sync::{
    command::{non_zero, progress::ProgressLog},
    config::{CacheConfig, Config},
    error::Error,
    event_log::FileEventLog,
    service::reference_cache::{select_sources, CacheSyncOptions, ReferenceCacheService},
    source::mariadb::MariaDbFetcher,
    startup,
    util::time::format_elapsed,
};

#[derive(Args, Debug)]
pub struct SyncCacheArgs {
    /// Single source name to sync.
    #[arg(long)]
    pub source: Option<String>,
    /// Fetch only; do not write to the cache store.
    #[arg(long)]
    pub dry_run: bool,
    /// Print per-table counts for each source.
    #[arg(long)]
    pub verbose: bool,
    /// Row limit per table (0 = no limit).
    #[arg(long, default_value_t = 0)]
    pub limit: usize,
}

pub async fn run(args: SyncCacheArgs) -> Result<(), Error> {
    let config = Config::from_env()?;
    let cache_config = CacheConfig::from_env()?;
    let sources = startup::load_sources(&config)?;

    let source_filter = args
        .source
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let selected = select_sources(&sources, source_filter.as_deref())?.len();

    // Migrations are writes, so a dry run only connects.
    let db = startup::connect_to_cache(&cache_config, !args.dry_run).await?;
    let fetcher = MariaDbFetcher::new();
    let log = FileEventLog::new(&config.sync_log_path);
    let events = ProgressLog::new(&log, "Cache sync");
    let service = ReferenceCacheService::new(&db, &fetcher, &events, cache_config.batch_size);

    println!("Starting permission cache sync for {} source(s)...", selected);

    let started = Instant::now();
    let options = CacheSyncOptions {
        source_filter,
        dry_run: args.dry_run,
        row_limit: non_zero(args.limit),
        verbose: args.verbose,
    };
    let result = service.sync_reference_tables(&sources, &options).await;

    if let Err(e) = db.close().await {
        tracing::warn!("Failed to close cache store connection: {}", e);
    }
    let summaries = result?;

    if args.verbose {
        for summary in &summaries {
            println!("Counts for {}: {}", summary.source, summary.counts);
            if let Some(written) = &summary.written {
                println!("Written for {}: {}", summary.source, written);
            }
        }
    }

    let mode = if args.dry_run { "dry-run" } else { "write" };
    println!(
        "Permission cache sync finished in {} ({}).",
        format_elapsed(started.elapsed()),
        mode
    );

    Ok(())
}
