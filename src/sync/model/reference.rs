//! Rows of the twelve reference and permission tables as read from a source.
//!
//! Every row type is decoded straight from a source query with `FromQueryResult`; the
//! queries alias their columns to the field names below. Flag columns stay as the raw
//! source strings (`Yes`/`No`) and are interpreted with [`is_yes`] when written to the cache.

use std::fmt;

use sea_orm::FromQueryResult;
use serde::Serialize;

/// Reseller, VISP and supporter rows share the same shape.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct NamedRow {
    pub source_id: i64,
    pub name: Option<String>,
    pub is_enable: Option<String>,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct CenterRow {
    pub source_id: i64,
    pub name: Option<String>,
    pub is_enable: Option<String>,
    pub visp_access: Option<String>,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct StatusRow {
    pub source_id: i64,
    pub name: Option<String>,
    pub is_enable: Option<String>,
    pub reseller_access: Option<String>,
    pub visp_access: Option<String>,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct ServiceRow {
    pub source_id: i64,
    pub name: Option<String>,
    pub is_enable: Option<String>,
    pub is_del: Option<String>,
    pub reseller_access: Option<String>,
    pub visp_access: Option<String>,
}

#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct ResellerPermitRow {
    pub source_id: i64,
    pub reseller_id: Option<i64>,
    pub visp_id: Option<i64>,
    pub permit_item_id: Option<i64>,
    pub is_permit: Option<String>,
}

/// Association row linking a subject (service, status or center) to a reseller or VISP.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct AccessRow {
    pub source_id: i64,
    pub subject_id: Option<i64>,
    pub target_id: Option<i64>,
    pub checked: Option<String>,
}

/// Everything fetched from one source for a reference cache sync.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceSnapshot {
    pub resellers: Vec<NamedRow>,
    pub visps: Vec<NamedRow>,
    pub centers: Vec<CenterRow>,
    pub supporters: Vec<NamedRow>,
    pub statuses: Vec<StatusRow>,
    pub services: Vec<ServiceRow>,
    pub reseller_permits: Vec<ResellerPermitRow>,
    pub service_reseller: Vec<AccessRow>,
    pub status_reseller: Vec<AccessRow>,
    pub service_visp: Vec<AccessRow>,
    pub status_visp: Vec<AccessRow>,
    pub center_visp: Vec<AccessRow>,
}

impl ReferenceSnapshot {
    /// Truncates every table to at most `limit` rows.
    pub fn truncate(&mut self, limit: usize) {
        self.resellers.truncate(limit);
        self.visps.truncate(limit);
        self.centers.truncate(limit);
        self.supporters.truncate(limit);
        self.statuses.truncate(limit);
        self.services.truncate(limit);
        self.reseller_permits.truncate(limit);
        self.service_reseller.truncate(limit);
        self.status_reseller.truncate(limit);
        self.service_visp.truncate(limit);
        self.status_visp.truncate(limit);
        self.center_visp.truncate(limit);
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            resellers: self.resellers.len(),
            visps: self.visps.len(),
            centers: self.centers.len(),
            supporters: self.supporters.len(),
            statuses: self.statuses.len(),
            services: self.services.len(),
            reseller_permits: self.reseller_permits.len(),
            service_reseller: self.service_reseller.len(),
            status_reseller: self.status_reseller.len(),
            service_visp: self.service_visp.len(),
            status_visp: self.status_visp.len(),
            center_visp: self.center_visp.len(),
        }
    }
}

/// Fetched row count per reference table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub resellers: usize,
    pub visps: usize,
    pub centers: usize,
    pub supporters: usize,
    pub statuses: usize,
    pub services: usize,
    pub reseller_permits: usize,
    pub service_reseller: usize,
    pub status_reseller: usize,
    pub service_visp: usize,
    pub status_visp: usize,
    pub center_visp: usize,
}

impl TableCounts {
    pub fn total(&self) -> usize {
        self.resellers
            + self.visps
            + self.centers
            + self.supporters
            + self.statuses
            + self.services
            + self.reseller_permits
            + self.service_reseller
            + self.status_reseller
            + self.service_visp
            + self.status_visp
            + self.center_visp
    }
}

impl fmt::Display for TableCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resellers={} visps={} centers={} supporters={} statuses={} services={} \
             reseller_permits={} service_reseller={} status_reseller={} service_visp={} \
             status_visp={} center_visp={}",
            self.resellers,
            self.visps,
            self.centers,
            self.supporters,
            self.statuses,
            self.services,
            self.reseller_permits,
            self.service_reseller,
            self.status_reseller,
            self.service_visp,
            self.status_visp,
            self.center_visp,
        )
    }
}

/// Per-source result of a reference cache sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceSummary {
    pub source: String,
    /// Rows fetched per table, after the row limit.
    pub counts: TableCounts,
    /// Rows written per table once duplicate natural keys were dropped. `None` on a dry run.
    pub written: Option<TableCounts>,
    pub dry_run: bool,
}

/// Interprets a source flag column. Only a case-insensitive `yes` is true.
pub fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
}

/// Access mode strings default to `All` when the source leaves them empty.
pub fn access_or_all(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "All".to_string(),
    }
}
