use super::*;
use crate::sync::util::test::{
    fetcher::FakeSourceFetcher,
    mock::{date, mock_identity, mock_record, mock_source, mock_target},
    sink::MemoryEventSink,
    warehouse::{RecordingWarehouse, WarehouseCall},
};

mod backfill;

fn legacy() -> TableId {
    TableId::new("test-project", "reports", "hspdata")
}
