use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::sync::{
    data::cache::CacheRepository,
    error::{config::ConfigError, Error},
    event_log::EventSink,
    model::{event::EventType, reference::SourceSummary, source::Source},
    source::SourceFetcher,
};

/// Options of one reference cache sync run.
#[derive(Clone, Debug, Default)]
pub struct CacheSyncOptions {
    /// Only sync the source with this name.
    pub source_filter: Option<String>,
    /// Fetch and count without writing to the cache store.
    pub dry_run: bool,
    /// Truncate every fetched table to at most this many rows. Zero means no limit.
    pub row_limit: Option<usize>,
    /// Log per-table counts for each source.
    pub verbose: bool,
}

pub struct ReferenceCacheService<'a> {
    db: &'a DatabaseConnection,
    fetcher: &'a dyn SourceFetcher,
    events: &'a dyn EventSink,
    batch_size: usize,
}

impl<'a> ReferenceCacheService<'a> {
    /// Creates a new instance of [`ReferenceCacheService`]
    pub fn new(
        db: &'a DatabaseConnection,
        fetcher: &'a dyn SourceFetcher,
        events: &'a dyn EventSink,
        batch_size: usize,
    ) -> Self {
        Self {
            db,
            fetcher,
            events,
            batch_size,
        }
    }

    /// Replaces the cached reference tables of every selected source with a fresh fetch.
    ///
    /// Sources are processed one after another, each inside its own cache transaction, so a
    /// failing source keeps its previous rows while sources already synced keep their new
    /// ones. Fetch failures are not isolated: the first failing source ends the run.
    ///
    /// # Returns
    /// - `Ok(Vec<SourceSummary>)` - Fetched row counts per source, in source order
    /// - `Err(Error::ConfigError)` - No sources configured or the filter names an unknown source
    /// - `Err(Error::SourceError)` - A source could not be read
    /// - `Err(Error::DbErr)` - Writing to the cache store failed
    pub async fn sync_reference_tables(
        &self,
        sources: &[Source],
        options: &CacheSyncOptions,
    ) -> Result<Vec<SourceSummary>, Error> {
        let selected = select_sources(sources, options.source_filter.as_deref())?;

        let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
        self.events.emit(
            EventType::CacheSyncStart,
            "Reference cache sync started",
            json!({"sources": names, "dry_run": options.dry_run, "limit": options.row_limit}),
        );

        let mut summaries = Vec::with_capacity(selected.len());
        for source in selected {
            let summary = match self.sync_source(source, options).await {
                Ok(summary) => summary,
                Err(e) => {
                    self.events.emit(
                        EventType::CacheSourceError,
                        "Reference cache sync failed for source",
                        json!({"source": source.name, "error": e.to_string()}),
                    );
                    return Err(e);
                }
            };

            self.events.emit(
                EventType::CacheSourceSuccess,
                "Reference cache synced for source",
                json!({
                    "source": summary.source,
                    "counts": summary.counts,
                    "written": summary.written,
                    "dry_run": summary.dry_run,
                }),
            );
            summaries.push(summary);
        }

        self.events.emit(
            EventType::CacheSyncComplete,
            "Reference cache sync complete",
            json!({"sources": summaries.len(), "dry_run": options.dry_run}),
        );

        Ok(summaries)
    }

    async fn sync_source(
        &self,
        source: &Source,
        options: &CacheSyncOptions,
    ) -> Result<SourceSummary, Error> {
        let mut snapshot = self.fetcher.fetch_reference_snapshot(source).await?;
        if let Some(limit) = options.row_limit.filter(|limit| *limit > 0) {
            snapshot.truncate(limit);
        }

        let counts = snapshot.counts();
        if options.verbose {
            tracing::info!(source = %source.name, "Fetched {}", counts);
        }

        let written = if options.dry_run {
            None
        } else {
            let txn = self.db.begin().await?;
            let written = CacheRepository::new(&txn, self.batch_size)
                .replace_snapshot(&source.name, &snapshot)
                .await?;
            txn.commit().await?;

            tracing::info!(
                source = %source.name,
                rows = written.total(),
                "Replaced cached reference tables"
            );
            Some(written)
        };

        Ok(SourceSummary {
            source: source.name.clone(),
            counts,
            written,
            dry_run: options.dry_run,
        })
    }
}

/// Sources named by `filter`, or all of them.
///
/// # Returns
/// - `Err(ConfigError::NoSources)` - `sources` is empty
/// - `Err(ConfigError::UnknownSource)` - No source is named `filter`
pub fn select_sources<'s>(
    sources: &'s [Source],
    filter: Option<&str>,
) -> Result<Vec<&'s Source>, ConfigError> {
    if sources.is_empty() {
        return Err(ConfigError::NoSources);
    }

    match filter {
        Some(name) => {
            let selected: Vec<&Source> = sources.iter().filter(|s| s.name == name).collect();
            if selected.is_empty() {
                return Err(ConfigError::UnknownSource(name.to_string()));
            }
            Ok(selected)
        }
        None => Ok(sources.iter().collect()),
    }
}

#[cfg(test)]
mod tests;
