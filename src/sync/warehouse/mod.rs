//! Analytical warehouse access.
//!
//! The sync services talk to the warehouse through the [`Warehouse`] trait. Rows reach the
//! warehouse as CSV [`stage::StageFile`]s loaded into tables, and every change to a target
//! table is issued as a single statement built by [`sql`]. [`bigquery::BigQueryClient`] is
//! the production implementation over the BigQuery REST API.

pub mod bigquery;
pub mod sql;
pub mod stage;

use std::{fmt, path::Path, str::FromStr};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::sync::error::{validation::ValidationError, warehouse::WarehouseError};

/// Fully qualified `project.dataset.table` identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TableId {
    pub project: String,
    pub dataset: String,
    pub table: String,
}

impl TableId {
    pub fn new(
        project: impl Into<String>,
        dataset: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            dataset: dataset.into(),
            table: table.into(),
        }
    }

    /// Sibling table in the same dataset named `{prefix}_{random suffix}`.
    pub fn stage(&self, prefix: &str) -> Self {
        self.sibling(&format!("{}_{}", prefix, uuid::Uuid::new_v4().simple()))
    }

    pub fn sibling(&self, table: &str) -> Self {
        Self::new(self.project.clone(), self.dataset.clone(), table)
    }

    /// Identifier quoted for use in GoogleSQL statements.
    pub fn quoted(&self) -> String {
        format!("`{}`", self)
    }
}

impl FromStr for TableId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.trim().split('.').collect();

        match parts.as_slice() {
            [project, dataset, table]
                if [project, dataset, table].iter().all(|part| !part.is_empty()) =>
            {
                Ok(Self::new(*project, *dataset, *table))
            }
            _ => Err(ValidationError::InvalidTableId(value.to_string())),
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Date,
}

/// One nullable column of a table schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
}

const fn field(name: &'static str, field_type: FieldType) -> FieldSchema {
    FieldSchema { name, field_type }
}

/// Column layout of the user service fact table, in positional order.
pub const FACT_SCHEMA: [FieldSchema; 13] = [
    field("id", FieldType::Integer),
    field("CreateDate", FieldType::Date),
    field("rs_userid", FieldType::Integer),
    field("rs_username", FieldType::String),
    field("rs_name", FieldType::String),
    field("UserServiceID", FieldType::Integer),
    field("username", FieldType::String),
    field("ServiceName", FieldType::String),
    field("ServicePrice", FieldType::Float),
    field("Package", FieldType::Float),
    field("ServiceStatus", FieldType::String),
    field("StartDate", FieldType::Date),
    field("EndDate", FieldType::Date),
];

/// Column layout of the reseller identity map stage used by the backfill.
pub const RESELLER_MAP_SCHEMA: [FieldSchema; 3] = [
    field("creator_norm", FieldType::String),
    field("rs_userid", FieldType::Integer),
    field("rs_name", FieldType::String),
];

/// What a load job does with rows already in the destination table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WriteDisposition {
    #[default]
    Truncate,
    Append,
}

impl WriteDisposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Truncate => "WRITE_TRUNCATE",
            Self::Append => "WRITE_APPEND",
        }
    }
}

impl fmt::Display for WriteDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named `DATE` parameter bound into a statement as `@name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryParameter {
    pub name: String,
    pub value: NaiveDate,
}

impl QueryParameter {
    pub fn date(name: impl Into<String>, value: NaiveDate) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Loads a CSV file with a header row into `table`, creating it if needed.
    async fn load_csv(
        &self,
        table: &TableId,
        csv_path: &Path,
        schema: &[FieldSchema],
        disposition: WriteDisposition,
    ) -> Result<(), WarehouseError>;

    /// Creates an empty table with `schema`.
    async fn create_table(&self, table: &TableId, schema: &[FieldSchema])
        -> Result<(), WarehouseError>;

    /// Runs one (possibly multi-statement) SQL script and waits for it to finish.
    async fn execute(&self, sql: &str, params: &[QueryParameter]) -> Result<(), WarehouseError>;

    /// Deletes `table`. A table that does not exist is not an error.
    async fn delete_table(&self, table: &TableId) -> Result<(), WarehouseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_qualified_table_id() {
        let table: TableId = "proj.reports.report_user_service".parse().unwrap();

        assert_eq!(table, TableId::new("proj", "reports", "report_user_service"));
        assert_eq!(table.to_string(), "proj.reports.report_user_service");
        assert_eq!(table.quoted(), "`proj.reports.report_user_service`");
    }

    #[test]
    fn rejects_partial_table_ids() {
        for value in ["reports.table", "a..c", "a.b.c.d", ""] {
            assert!(matches!(
                value.parse::<TableId>(),
                Err(ValidationError::InvalidTableId(_))
            ));
        }
    }

    #[test]
    fn stage_tables_are_unique_siblings() {
        let target = TableId::new("proj", "reports", "report_user_service");
        let first = target.stage("report_user_service_stage");
        let second = target.stage("report_user_service_stage");

        assert_eq!(first.dataset, "reports");
        assert!(first.table.starts_with("report_user_service_stage_"));
        assert_eq!(first.table.len(), "report_user_service_stage_".len() + 32);
        assert_ne!(first, second);
    }

    #[test]
    fn fact_schema_matches_record_columns() {
        let names: Vec<&str> = FACT_SCHEMA.iter().map(|f| f.name).collect();

        assert_eq!(names[0], "id");
        assert_eq!(names[12], "EndDate");
        assert_eq!(serde_json::to_value(FieldType::Date).unwrap(), "DATE");
    }
}
