use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackfillError {
    #[error("No MariaDB rows returned for cutoff date {0}")]
    NoLiveRows(NaiveDate),
}
