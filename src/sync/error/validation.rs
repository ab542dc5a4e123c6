use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidationError {
    /// Date argument is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid {field}: {value}")]
    InvalidDate { field: &'static str, value: String },
    /// Table argument is not a fully qualified `project.dataset.table` identifier.
    #[error("Invalid table id {0:?}, expected project.dataset.table")]
    InvalidTableId(String),
    #[error("End date {end} is before start date {start}")]
    InvertedWindow { start: NaiveDate, end: NaiveDate },
}
