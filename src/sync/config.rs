//! Environment-sourced configuration.
//!
//! Each command only loads the configuration it needs: every command needs the
//! [`Config`] (sources and event log path), the cache sync additionally needs
//! [`CacheConfig`], and the warehouse commands need [`WarehouseConfig`]. Every loader has a
//! `from_lookup` variant taking a key lookup function so tests never touch the process
//! environment.

use std::path::PathBuf;

use crate::sync::{
    error::{config::ConfigError, validation::ValidationError},
    warehouse::TableId,
};

const DEFAULT_MARIA_HOST: &str = "localhost";
const DEFAULT_MARIA_PORT: u16 = 3306;
const DEFAULT_MARIA_USER: &str = "root";
const DEFAULT_SYNC_LOG_PATH: &str = "sync_logs.jsonl";
const DEFAULT_CACHE_BATCH_SIZE: usize = 1000;
const DEFAULT_BQ_LOCATION: &str = "US";
const DEFAULT_BQ_API_URL: &str = "https://bigquery.googleapis.com";

pub struct Config {
    pub sources: SourceSettings,
    pub sync_log_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            sources: SourceSettings::from_lookup(&lookup)?,
            sync_log_path: optional(&lookup, "SYNC_LOG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SYNC_LOG_PATH)),
        })
    }
}

/// Raw source registry settings.
///
/// `descriptor` holds the multi-source `MARIA_SOURCES` value when present; the remaining
/// fields describe the single source used when it is absent. Turning these settings into
/// [`Source`](crate::sync::model::source::Source) values is the job of
/// [`parse_sources`](crate::sync::source::registry::parse_sources).
#[derive(Clone, Debug, Default)]
pub struct SourceSettings {
    pub descriptor: Option<String>,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
}

impl SourceSettings {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match optional(&lookup, "MARIA_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "MARIA_PORT".to_string(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_MARIA_PORT,
        };

        Ok(Self {
            descriptor: optional(&lookup, "MARIA_SOURCES"),
            host: optional(&lookup, "MARIA_HOST").unwrap_or_else(|| DEFAULT_MARIA_HOST.to_string()),
            port,
            database: optional(&lookup, "MARIA_DB").unwrap_or_default(),
            user: optional(&lookup, "MARIA_USER").unwrap_or_else(|| DEFAULT_MARIA_USER.to_string()),
            password: lookup("MARIA_PASSWORD").unwrap_or_default(),
        })
    }
}

/// Reference cache store settings.
pub struct CacheConfig {
    pub database_url: String,
    /// Rows per bulk insert statement.
    pub batch_size: usize,
}

impl CacheConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let batch_size = match optional(&lookup, "CACHE_SYNC_BATCH_SIZE") {
            Some(value) => match value.parse::<usize>() {
                Ok(size) if size > 0 => size,
                Ok(_) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "CACHE_SYNC_BATCH_SIZE".to_string(),
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "CACHE_SYNC_BATCH_SIZE".to_string(),
                        reason: e.to_string(),
                    })
                }
            },
            None => DEFAULT_CACHE_BATCH_SIZE,
        };

        Ok(Self {
            database_url: required(&lookup, "CACHE_DATABASE_URL")?,
            batch_size,
        })
    }
}

/// BigQuery warehouse settings.
#[derive(Clone, Debug)]
pub struct WarehouseConfig {
    pub project: String,
    pub dataset: String,
    pub table: String,
    pub location: String,
    /// Fully qualified legacy dataset table used by the backfill, if overridden.
    pub legacy_table: Option<String>,
    pub api_url: String,
    /// Static bearer token; when absent the token is requested from the metadata server.
    pub access_token: Option<String>,
}

impl WarehouseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            project: required(&lookup, "BQ_PROJECT")?,
            dataset: required(&lookup, "BQ_DATASET")?,
            table: required(&lookup, "BQ_TABLE")?,
            location: optional(&lookup, "BQ_LOCATION")
                .unwrap_or_else(|| DEFAULT_BQ_LOCATION.to_string()),
            legacy_table: optional(&lookup, "BQ_HSP_TABLE"),
            api_url: optional(&lookup, "BQ_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BQ_API_URL.to_string()),
            access_token: optional(&lookup, "BQ_ACCESS_TOKEN"),
        })
    }

    /// The configured fact table.
    pub fn target_table(&self) -> TableId {
        TableId::new(&self.project, &self.dataset, &self.table)
    }

    /// The legacy dataset table read by the backfill, `hspdata` next to the target unless
    /// overridden.
    pub fn legacy_table(&self) -> Result<TableId, ValidationError> {
        match &self.legacy_table {
            Some(table) => table.parse(),
            None => Ok(TableId::new(&self.project, &self.dataset, "hspdata")),
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads a variable, treating blank values as unset.
fn optional(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    optional(lookup, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}
