//! Date argument parsing and elapsed time formatting.

use std::time::Duration;

use chrono::NaiveDate;

use crate::sync::error::validation::ValidationError;

/// Parses an ISO `YYYY-MM-DD` calendar date given for `field`.
///
/// # Returns
/// - `Ok(NaiveDate)` - The parsed date
/// - `Err(ValidationError::InvalidDate)` - The value is not a valid calendar date
pub fn parse_iso_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}

/// Validates an optional inclusive window, rejecting an end date before the start date.
pub fn parse_window(
    start: &str,
    end: Option<&str>,
) -> Result<(NaiveDate, Option<NaiveDate>), ValidationError> {
    let start = parse_iso_date("start_date", start)?;
    let end = end.map(|end| parse_iso_date("end_date", end)).transpose()?;

    if let Some(end) = end.filter(|end| *end < start) {
        return Err(ValidationError::InvertedWindow { start, end });
    }

    Ok((start, end))
}

/// Seconds with one decimal, as printed in command progress lines.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.1}s", elapsed.as_secs_f64())
}
