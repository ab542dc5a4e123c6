use sea_orm::EntityTrait;
use sync_test_utils::prelude::*;

use super::*;
use crate::sync::util::test::{
    fetcher::FakeSourceFetcher,
    mock::{mock_snapshot, mock_source},
    sink::MemoryEventSink,
};
