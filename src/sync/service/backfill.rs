//! Merge of the legacy fact dataset with live source rows.

use chrono::NaiveDate;
use serde_json::json;

use crate::sync::{
    error::{backfill::BackfillError, config::ConfigError, Error},
    event_log::EventSink,
    model::{
        event::EventType,
        source::Source,
        user_service::{dedupe_identities, sort_and_rank},
    },
    source::{FactFilter, SourceFetcher},
    warehouse::{
        sql, stage::StageFile, QueryParameter, TableId, Warehouse, WriteDisposition,
        FACT_SCHEMA, RESELLER_MAP_SCHEMA,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackfillReport {
    /// Live rows staged from the sources.
    pub live_rows: usize,
    /// Distinct reseller identities staged for resolving legacy creators.
    pub identities: usize,
}

pub struct BackfillService<'a> {
    fetcher: &'a dyn SourceFetcher,
    warehouse: &'a dyn Warehouse,
    events: &'a dyn EventSink,
}

impl<'a> BackfillService<'a> {
    /// Creates a new instance of [`BackfillService`]
    pub fn new(
        fetcher: &'a dyn SourceFetcher,
        warehouse: &'a dyn Warehouse,
        events: &'a dyn EventSink,
    ) -> Self {
        Self {
            fetcher,
            warehouse,
            events,
        }
    }

    /// Rebuilds `target` from live rows created on or after `cutoff` and legacy rows before it.
    ///
    /// Live rows and the reseller identity map of every source are staged in two uniquely
    /// named tables next to the target, then a single create-or-replace statement builds the
    /// target from them and `legacy`. Both stage tables are deleted afterwards, whatever the
    /// outcome. Unlike the warehouse syncs, a failing source aborts the backfill.
    ///
    /// # Returns
    /// - `Ok(BackfillReport)` - Staged row counts
    /// - `Err(Error::ConfigError)` - No sources configured
    /// - `Err(Error::SourceError)` - A source could not be read
    /// - `Err(Error::BackfillError)` - No source has rows on or after the cutoff
    /// - `Err(Error::WarehouseError)` - Staging or the merge failed
    pub async fn backfill(
        &self,
        sources: &[Source],
        cutoff: NaiveDate,
        legacy: &TableId,
        target: &TableId,
    ) -> Result<BackfillReport, Error> {
        if sources.is_empty() {
            return Err(ConfigError::NoSources.into());
        }

        self.events.emit(
            EventType::BackfillStart,
            "Backfill started",
            json!({
                "target_table": target.to_string(),
                "hsp_table": legacy.to_string(),
                "cutoff_date": cutoff,
            }),
        );

        let live_stage = target.stage(&format!("{}_maria_stage", target.table));
        let map_stage = target.stage(&format!("{}_reseller_map", target.table));

        let result = self
            .merge(sources, cutoff, legacy, target, &live_stage, &map_stage)
            .await;

        for stage in [&live_stage, &map_stage] {
            if let Err(e) = self.warehouse.delete_table(stage).await {
                tracing::warn!(stage = %stage, "Failed to delete stage table: {}", e);
            }
        }

        match result {
            Ok(report) => {
                self.events.emit(
                    EventType::BackfillSuccess,
                    "Backfill completed",
                    json!({"target_table": target.to_string()}),
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(table = %target, "Backfill failed: {}", e);
                self.events.emit(
                    EventType::BackfillError,
                    "Backfill failed",
                    json!({"target_table": target.to_string(), "error": e.to_string()}),
                );
                Err(e)
            }
        }
    }

    async fn merge(
        &self,
        sources: &[Source],
        cutoff: NaiveDate,
        legacy: &TableId,
        target: &TableId,
        live_stage: &TableId,
        map_stage: &TableId,
    ) -> Result<BackfillReport, Error> {
        let filter = FactFilter {
            start_date: Some(cutoff),
            ..Default::default()
        };

        let mut live = Vec::new();
        let mut identities = Vec::new();
        for source in sources {
            let rows = self.fetcher.fetch_user_services(source, &filter).await?;
            tracing::info!(source = %source.name, rows = rows.len(), "Fetched live rows");
            live.extend(rows);

            identities.extend(self.fetcher.fetch_reseller_map(source).await?);
        }

        if live.is_empty() {
            return Err(BackfillError::NoLiveRows(cutoff).into());
        }

        sort_and_rank(&mut live);
        let identities = dedupe_identities(identities);

        let live_file = StageFile::write(&live)?;
        self.warehouse
            .load_csv(
                live_stage,
                live_file.path(),
                &FACT_SCHEMA,
                WriteDisposition::Truncate,
            )
            .await?;

        // The merge joins against the map even when no reseller has a name.
        if identities.is_empty() {
            self.warehouse
                .create_table(map_stage, &RESELLER_MAP_SCHEMA)
                .await?;
        } else {
            let map_file = StageFile::write(&identities)?;
            self.warehouse
                .load_csv(
                    map_stage,
                    map_file.path(),
                    &RESELLER_MAP_SCHEMA,
                    WriteDisposition::Truncate,
                )
                .await?;
        }

        self.warehouse
            .execute(
                &sql::backfill(target, legacy, live_stage, map_stage),
                &[QueryParameter::date("cutoff_date", cutoff)],
            )
            .await?;

        Ok(BackfillReport {
            live_rows: live.len(),
            identities: identities.len(),
        })
    }
}

#[cfg(test)]
mod tests;
