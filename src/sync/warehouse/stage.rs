//! Local CSV stage files.

use std::path::Path;

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::sync::error::warehouse::WarehouseError;

/// Temporary CSV file holding rows on their way into a warehouse table.
///
/// The header row is taken from the serialized field names. The file is removed when the
/// value is dropped.
pub struct StageFile {
    file: NamedTempFile,
    rows: usize,
}

impl StageFile {
    pub fn write<T: Serialize>(rows: &[T]) -> Result<Self, WarehouseError> {
        let file = tempfile::Builder::new()
            .prefix("warehouse_stage_")
            .suffix(".csv")
            .tempfile()?;

        let mut writer = csv::Writer::from_writer(file.reopen()?);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        Ok(Self {
            file,
            rows: rows.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}
