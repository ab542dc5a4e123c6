//! Full and windowed fact syncs into the warehouse.
//!
//! Both syncs fetch from every source independently: a source that fails is recorded and
//! skipped, and a run where no source returned rows ends as a no-op. The remaining rows are
//! concatenated, sorted and ranked as one batch before they reach the warehouse.

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use serde_json::json;

use crate::sync::{
    error::{config::ConfigError, Error},
    event_log::EventSink,
    model::{
        event::EventType,
        source::Source,
        user_service::{sort_and_rank, UserServiceRecord},
    },
    source::{FactFilter, SourceFetcher},
    warehouse::{
        sql, stage::StageFile, QueryParameter, TableId, Warehouse, WriteDisposition, FACT_SCHEMA,
    },
};

/// Options of a full warehouse sync.
#[derive(Clone, Debug, Default)]
pub struct FullSyncOptions {
    /// Per-source row cap. Zero means no cap.
    pub row_limit: Option<u64>,
    /// Only rows created in the trailing N days. Zero means no window.
    pub days: Option<u32>,
    pub disposition: WriteDisposition,
    /// Set when the run was started by a scheduler rather than an operator.
    pub auto: bool,
}

/// Options of a windowed warehouse sync. Both dates are inclusive.
#[derive(Clone, Debug)]
pub struct WindowSyncOptions {
    pub start_date: NaiveDate,
    /// Open-ended window when unset.
    pub end_date: Option<NaiveDate>,
    /// Per-source row cap. Zero means no cap.
    pub row_limit: Option<u64>,
    /// Replaces the configured target table.
    pub target: Option<TableId>,
}

/// Outcome of fetching one source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFetchReport {
    pub source: String,
    /// Row count, or the error message when the fetch failed.
    pub outcome: Result<usize, String>,
    pub elapsed: Duration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyncReport {
    pub target: TableId,
    /// Rows written to the warehouse. Zero when no source returned rows.
    pub rows: usize,
    pub sources: Vec<SourceFetchReport>,
}

/// Event types recorded for per-source fetch outcomes.
struct FetchEvents {
    success: EventType,
    error: EventType,
    announce: bool,
}

pub struct WarehouseSyncService<'a> {
    fetcher: &'a dyn SourceFetcher,
    warehouse: &'a dyn Warehouse,
    events: &'a dyn EventSink,
    target: &'a TableId,
}

impl<'a> WarehouseSyncService<'a> {
    /// Creates a new instance of [`WarehouseSyncService`] writing to `target` by default.
    pub fn new(
        fetcher: &'a dyn SourceFetcher,
        warehouse: &'a dyn Warehouse,
        events: &'a dyn EventSink,
        target: &'a TableId,
    ) -> Self {
        Self {
            fetcher,
            warehouse,
            events,
            target,
        }
    }

    /// Loads the fact rows of every source straight into the target table.
    ///
    /// With [`WriteDisposition::Truncate`] the load replaces the whole table, with
    /// [`WriteDisposition::Append`] the rows are added to it.
    ///
    /// # Returns
    /// - `Ok(SyncReport)` - Rows loaded (zero for a no-data run) and per-source outcomes
    /// - `Err(Error::ConfigError)` - No sources configured
    /// - `Err(Error::WarehouseError)` - Staging or loading failed
    pub async fn sync_full(
        &self,
        sources: &[Source],
        options: &FullSyncOptions,
    ) -> Result<SyncReport, Error> {
        if sources.is_empty() {
            return Err(ConfigError::NoSources.into());
        }

        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        self.events.emit(
            EventType::SyncStart,
            "Warehouse sync started",
            json!({
                "table_id": self.target.to_string(),
                "sources": names,
                "limit": options.row_limit,
                "days": options.days,
                "auto": options.auto,
                "write_disposition": options.disposition.as_str(),
            }),
        );

        let filter = FactFilter {
            days: options.days,
            limit: options.row_limit,
            ..Default::default()
        };
        let (mut records, reports) = self
            .fetch_all(
                sources,
                &filter,
                FetchEvents {
                    success: EventType::SourceSuccess,
                    error: EventType::SourceError,
                    announce: true,
                },
            )
            .await;

        if records.is_empty() {
            self.events.emit(
                EventType::SyncNoData,
                "No rows fetched from any source",
                json!({"table_id": self.target.to_string(), "auto": options.auto}),
            );
            return Ok(self.report(self.target, 0, reports));
        }

        sort_and_rank(&mut records);

        let loaded = async {
            let stage = StageFile::write(&records)?;
            self.warehouse
                .load_csv(self.target, stage.path(), &FACT_SCHEMA, options.disposition)
                .await
        }
        .await;

        if let Err(e) = loaded {
            tracing::error!(table = %self.target, "Warehouse load failed: {}", e);
            self.events.emit(
                EventType::SyncError,
                "Warehouse load failed",
                json!({
                    "table_id": self.target.to_string(),
                    "error": e.to_string(),
                    "auto": options.auto,
                }),
            );
            return Err(e.into());
        }

        self.events.emit(
            EventType::SyncLoaded,
            "Rows loaded into warehouse",
            json!({
                "rows": records.len(),
                "table_id": self.target.to_string(),
                "auto": options.auto,
            }),
        );

        Ok(self.report(self.target, records.len(), reports))
    }

    /// Replaces the target rows created inside the window with a fresh fetch.
    ///
    /// Rows are staged in a uniquely named table next to the target, then one transaction
    /// deletes the window from the target and copies the stage in. The stage table is
    /// deleted afterwards whether or not the swap succeeded. Target rows outside the window
    /// are never touched.
    ///
    /// # Returns
    /// - `Ok(SyncReport)` - Rows written (zero for a no-data run) and per-source outcomes
    /// - `Err(Error::ConfigError)` - No sources configured
    /// - `Err(Error::WarehouseError)` - Staging or the swap failed
    pub async fn sync_window(
        &self,
        sources: &[Source],
        options: &WindowSyncOptions,
    ) -> Result<SyncReport, Error> {
        if sources.is_empty() {
            return Err(ConfigError::NoSources.into());
        }

        let target = options.target.as_ref().unwrap_or(self.target);
        self.events.emit(
            EventType::WindowSyncStart,
            "Window sync started",
            json!({
                "target_table": target.to_string(),
                "start_date": options.start_date,
                "end_date": options.end_date,
                "limit": options.row_limit,
            }),
        );

        let filter = FactFilter {
            start_date: Some(options.start_date),
            end_date: options.end_date,
            limit: options.row_limit,
            ..Default::default()
        };
        let (mut records, reports) = self
            .fetch_all(
                sources,
                &filter,
                FetchEvents {
                    success: EventType::WindowSourceSuccess,
                    error: EventType::WindowSourceError,
                    announce: false,
                },
            )
            .await;

        if records.is_empty() {
            self.events.emit(
                EventType::WindowSyncNoData,
                "No rows fetched for window",
                json!({"target_table": target.to_string()}),
            );
            return Ok(self.report(target, 0, reports));
        }

        sort_and_rank(&mut records);

        let stage = target.stage(&format!("{}_stage", target.table));
        self.events.emit(
            EventType::WindowStageCreate,
            "Staging window rows",
            json!({"stage_table": stage.to_string()}),
        );

        let swapped = self.stage_and_swap(target, &stage, &records, options).await;

        if let Err(e) = self.warehouse.delete_table(&stage).await {
            tracing::warn!(stage = %stage, "Failed to delete stage table: {}", e);
        }

        if let Err(e) = swapped {
            tracing::error!(table = %target, "Window sync failed: {}", e);
            self.events.emit(
                EventType::WindowSyncError,
                "Window sync failed",
                json!({"target_table": target.to_string(), "error": e.to_string()}),
            );
            return Err(e);
        }

        self.events.emit(
            EventType::WindowSyncSuccess,
            "Window sync complete",
            json!({"rows": records.len(), "target_table": target.to_string()}),
        );

        Ok(self.report(target, records.len(), reports))
    }

    async fn stage_and_swap(
        &self,
        target: &TableId,
        stage: &TableId,
        records: &[UserServiceRecord],
        options: &WindowSyncOptions,
    ) -> Result<(), Error> {
        let file = StageFile::write(records)?;
        self.warehouse
            .load_csv(stage, file.path(), &FACT_SCHEMA, WriteDisposition::Truncate)
            .await?;

        let mut params = vec![QueryParameter::date("start_date", options.start_date)];
        if let Some(end) = options.end_date {
            params.push(QueryParameter::date("end_date", end));
        }

        self.warehouse
            .execute(
                &sql::window_swap(target, stage, options.end_date.is_some()),
                &params,
            )
            .await?;

        Ok(())
    }

    /// Fetches every source in order, recording and skipping failures.
    async fn fetch_all(
        &self,
        sources: &[Source],
        filter: &FactFilter,
        kinds: FetchEvents,
    ) -> (Vec<UserServiceRecord>, Vec<SourceFetchReport>) {
        let mut records = Vec::new();
        let mut reports = Vec::with_capacity(sources.len());

        for source in sources {
            if kinds.announce {
                self.events.emit(
                    EventType::SourceStart,
                    "Fetching source",
                    json!({"source": source.name, "host": source.host, "db": source.database}),
                );
            }

            let started = Instant::now();
            let fetched = self.fetcher.fetch_user_services(source, filter).await;
            let elapsed = started.elapsed();

            let outcome = match fetched {
                Ok(fetched) => {
                    let rows = fetched.len();
                    self.events.emit(
                        kinds.success,
                        "Source fetched",
                        json!({
                            "source": source.name,
                            "rows": rows,
                            "elapsed_ms": elapsed.as_millis() as u64,
                        }),
                    );
                    records.extend(fetched);
                    Ok(rows)
                }
                Err(e) => {
                    tracing::warn!(source = %e.source_name(), "Skipping source: {}", e);
                    self.events.emit(
                        kinds.error,
                        "Source fetch failed",
                        json!({
                            "source": e.source_name(),
                            "error": e.to_string(),
                            "elapsed_ms": elapsed.as_millis() as u64,
                        }),
                    );
                    Err(e.to_string())
                }
            };

            reports.push(SourceFetchReport {
                source: source.name.clone(),
                outcome,
                elapsed,
            });
        }

        (records, reports)
    }

    fn report(&self, target: &TableId, rows: usize, sources: Vec<SourceFetchReport>) -> SyncReport {
        SyncReport {
            target: target.clone(),
            rows,
            sources,
        }
    }
}

#[cfg(test)]
mod tests;
