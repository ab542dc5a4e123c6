//! Construction of the long-lived collaborators used by the commands.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::sync::{
    config::{CacheConfig, Config, WarehouseConfig},
    error::{config::ConfigError, Error},
    model::source::Source,
    source::registry::parse_sources,
    warehouse::bigquery::BigQueryClient,
};

/// Parses the configured sources, failing when none are usable.
pub fn load_sources(config: &Config) -> Result<Vec<Source>, ConfigError> {
    let sources = parse_sources(&config.sources);
    if sources.is_empty() {
        return Err(ConfigError::NoSources);
    }

    Ok(sources)
}

/// Connect to the cache store, running migrations when `migrate` is set
pub async fn connect_to_cache(
    config: &CacheConfig,
    migrate: bool,
) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    if migrate {
        Migrator::up(&db, None).await?;
    }

    Ok(db)
}

/// Build the BigQuery client from the warehouse settings
pub fn build_warehouse(config: &WarehouseConfig) -> Result<BigQueryClient, Error> {
    Ok(BigQueryClient::new(config)?)
}
