//! Reading from the MariaDB source databases.
//!
//! The sync services only see the [`SourceFetcher`] trait; [`mariadb::MariaDbFetcher`] is the
//! production implementation and tests substitute an in-memory fake.

pub mod mariadb;
pub mod query;
pub mod registry;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::sync::{
    error::source::SourceError,
    model::{
        reference::ReferenceSnapshot,
        source::Source,
        user_service::{ResellerIdentity, UserServiceRecord},
    },
};

/// Optional filters for the fact query. All present filters are combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FactFilter {
    /// Only rows created in the trailing N days. Zero disables the filter.
    pub days: Option<u32>,
    /// Inclusive start date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date, covering the whole day.
    pub end_date: Option<NaiveDate>,
    /// Row cap applied after ordering newest first. Zero disables the cap.
    pub limit: Option<u64>,
}

#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Fetches all twelve reference and permission tables from `source`.
    async fn fetch_reference_snapshot(&self, source: &Source)
        -> Result<ReferenceSnapshot, SourceError>;

    /// Fetches normalized fact rows from `source`, tagged with the source name.
    async fn fetch_user_services(
        &self,
        source: &Source,
        filter: &FactFilter,
    ) -> Result<Vec<UserServiceRecord>, SourceError>;

    /// Fetches the reseller identity map entries of `source`, blank names excluded.
    async fn fetch_reseller_map(&self, source: &Source)
        -> Result<Vec<ResellerIdentity>, SourceError>;
}
