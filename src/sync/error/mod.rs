//! Error types for the synchronization layer.
//!
//! Errors are grouped by where they originate: configuration, argument validation, the
//! MariaDB sources, and the warehouse. The crate-level [`Error`] aggregates them with
//! `#[from]` conversions so services can propagate any of them with `?`.

pub mod backfill;
pub mod config;
pub mod source;
pub mod validation;
pub mod warehouse;

use thiserror::Error;

use crate::sync::error::{
    backfill::BackfillError, config::ConfigError, source::SourceError,
    validation::ValidationError, warehouse::WarehouseError,
};

/// Main error type for the synchronization layer.
///
/// # Error Categories
/// - Configuration errors (missing warehouse identifiers, no sources, unknown source)
/// - Validation errors (malformed dates or table identifiers), raised before any I/O
/// - Source errors (connection or query failure against a MariaDB source)
/// - Warehouse errors (REST calls, load/query jobs, stage files)
/// - Cache store errors (transaction, delete or insert failures)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables, source selection).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Invalid command argument.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Failure reading from a MariaDB source.
    #[error(transparent)]
    SourceError(#[from] SourceError),
    /// Failure talking to the warehouse.
    #[error(transparent)]
    WarehouseError(#[from] WarehouseError),
    /// Backfill precondition failure.
    #[error(transparent)]
    BackfillError(#[from] BackfillError),
    /// Cache store error (query failures, connection issues, transaction failures).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Local I/O error (event log reads).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
