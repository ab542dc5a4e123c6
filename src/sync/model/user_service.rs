//! User service fact rows and the reseller identity map used by the backfill.

use std::{cmp::Ordering, collections::HashSet};

use chrono::NaiveDate;
use sea_orm::FromQueryResult;
use serde::Serialize;

const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// Raw fact row as returned by the source query, before normalization.
#[derive(Clone, Debug, Default, PartialEq, FromQueryResult)]
pub struct UserServiceRow {
    pub create_date: Option<String>,
    pub rs_userid: Option<i64>,
    pub rs_username: Option<String>,
    pub user_service_id: Option<i64>,
    pub username: Option<String>,
    pub service_name: Option<String>,
    pub service_price: Option<f64>,
    pub s_tra: Option<i64>,
    pub m_tra: Option<i64>,
    pub d_tra: Option<i64>,
    pub y_tra: Option<i64>,
    pub extra_traffic: Option<i64>,
    pub service_status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Normalized fact row in warehouse column order.
///
/// `id` is positional: it is assigned by [`sort_and_rank`] over the whole batch and is
/// not stable across runs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UserServiceRecord {
    pub id: u64,
    #[serde(rename = "CreateDate")]
    pub create_date: Option<NaiveDate>,
    pub rs_userid: Option<i64>,
    pub rs_username: Option<String>,
    pub rs_name: String,
    #[serde(rename = "UserServiceID")]
    pub user_service_id: Option<i64>,
    pub username: Option<String>,
    #[serde(rename = "ServiceName")]
    pub service_name: Option<String>,
    #[serde(rename = "ServicePrice")]
    pub service_price: Option<f64>,
    #[serde(rename = "Package")]
    pub package: Option<f64>,
    #[serde(rename = "ServiceStatus")]
    pub service_status: Option<String>,
    #[serde(rename = "StartDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "EndDate")]
    pub end_date: Option<NaiveDate>,
}

impl UserServiceRecord {
    /// Normalizes a raw row fetched from `source_name`. The id is left at 0 until ranking.
    pub fn from_row(row: UserServiceRow, source_name: &str) -> Self {
        let package = package_gib([row.s_tra, row.m_tra, row.d_tra, row.y_tra, row.extra_traffic]);

        Self {
            id: 0,
            create_date: parse_source_date(row.create_date.as_deref()),
            rs_userid: row.rs_userid,
            rs_username: row.rs_username,
            rs_name: source_name.to_string(),
            user_service_id: row.user_service_id,
            username: row.username,
            service_name: row.service_name,
            service_price: row.service_price,
            package,
            service_status: row.service_status,
            start_date: parse_source_date(row.start_date.as_deref()),
            end_date: parse_source_date(row.end_date.as_deref()),
        }
    }
}

/// Traffic allotment in GiB from the first non-zero quota column, rounded to 2 decimals.
///
/// Columns are checked in source query order: `STrA`, `MTrA`, `DTrA`, `YTrA`, then
/// `ExtraTraffic`. Returns `None` when every column is zero or missing.
pub fn package_gib(traffic: [Option<i64>; 5]) -> Option<f64> {
    traffic
        .into_iter()
        .flatten()
        .find(|bytes| *bytes != 0)
        .map(|bytes| (bytes as f64 / BYTES_PER_GIB * 100.0).round() / 100.0)
}

/// Parses a `YYYY-MM-DD` source date. The `0000-00-00` sentinel and garbage become `None`.
pub fn parse_source_date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

/// Sorts a batch by (username asc, UserServiceID asc, CreateDate desc), nulls last, then
/// assigns dense 1-based ids in that order.
pub fn sort_and_rank(records: &mut [UserServiceRecord]) {
    records.sort_by(|a, b| {
        nulls_last(&a.username, &b.username, false)
            .then_with(|| nulls_last(&a.user_service_id, &b.user_service_id, false))
            .then_with(|| nulls_last(&a.create_date, &b.create_date, true))
    });

    for (index, record) in records.iter_mut().enumerate() {
        record.id = index as u64 + 1;
    }
}

fn nulls_last<T: Ord>(a: &Option<T>, b: &Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if descending => b.cmp(a),
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reseller row used to build the identity map.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct ResellerNameRow {
    pub reseller_id: i64,
    pub reseller_name: Option<String>,
}

/// Normalized reseller name resolved to a reseller id on a given source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResellerIdentity {
    pub creator_norm: String,
    pub rs_userid: i64,
    pub rs_name: String,
}

impl ResellerIdentity {
    pub fn from_row(row: ResellerNameRow, source_name: &str) -> Self {
        Self {
            creator_norm: normalize_creator(row.reseller_name.as_deref().unwrap_or_default()),
            rs_userid: row.reseller_id,
            rs_name: source_name.to_string(),
        }
    }
}

/// Join key for matching legacy creator names against reseller names.
pub fn normalize_creator(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Keeps the first identity seen for each normalized name and drops blank names.
pub fn dedupe_identities(identities: Vec<ResellerIdentity>) -> Vec<ResellerIdentity> {
    let mut seen = HashSet::new();

    identities
        .into_iter()
        .filter(|identity| !identity.creator_norm.is_empty())
        .filter(|identity| seen.insert(identity.creator_norm.clone()))
        .collect()
}
