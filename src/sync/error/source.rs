use thiserror::Error;

/// Failure reading from a single MariaDB source.
///
/// Every variant carries the source name so callers isolating per-source failures can
/// report which source failed without extra bookkeeping.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to connect to source {source_name}: {error}")]
    Connect {
        source_name: String,
        #[source]
        error: sea_orm::DbErr,
    },
    #[error("Query failed on source {source_name}: {error}")]
    Query {
        source_name: String,
        #[source]
        error: sea_orm::DbErr,
    },
}

impl SourceError {
    /// Name of the source the failure happened on.
    pub fn source_name(&self) -> &str {
        match self {
            Self::Connect { source_name, .. } | Self::Query { source_name, .. } => source_name,
        }
    }
}
