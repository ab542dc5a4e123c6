use super::*;
use crate::sync::util::test::{
    fetcher::FakeSourceFetcher,
    mock::{date, mock_record, mock_source, mock_target},
    sink::MemoryEventSink,
    warehouse::RecordingWarehouse,
};


fn window(start: &str, end: Option<&str>) -> WindowSyncOptions {
    WindowSyncOptions {
        start_date: date(start),
        end_date: end.map(date),
        row_limit: None,
        target: None,
    }
}

/// Data lines of a stage CSV, header dropped.
fn csv_rows(csv: &str) -> Vec<&str> {
    csv.lines().skip(1).collect()
}
