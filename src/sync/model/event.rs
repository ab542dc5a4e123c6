use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle event kinds written to the sync event log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventType {
    SyncStart,
    SourceStart,
    SourceSuccess,
    SourceError,
    SyncNoData,
    SyncLoaded,
    SyncError,
    WindowSyncStart,
    WindowSourceSuccess,
    WindowSourceError,
    WindowSyncNoData,
    WindowStageCreate,
    WindowSyncSuccess,
    WindowSyncError,
    BackfillStart,
    BackfillSuccess,
    BackfillError,
    CacheSyncStart,
    CacheSourceSuccess,
    CacheSourceError,
    CacheSyncComplete,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SyncStart => "sync_start",
            Self::SourceStart => "source_start",
            Self::SourceSuccess => "source_success",
            Self::SourceError => "source_error",
            Self::SyncNoData => "sync_no_data",
            Self::SyncLoaded => "sync_loaded",
            Self::SyncError => "sync_error",
            Self::WindowSyncStart => "window_sync_start",
            Self::WindowSourceSuccess => "window_source_success",
            Self::WindowSourceError => "window_source_error",
            Self::WindowSyncNoData => "window_sync_no_data",
            Self::WindowStageCreate => "window_stage_create",
            Self::WindowSyncSuccess => "window_sync_success",
            Self::WindowSyncError => "window_sync_error",
            Self::BackfillStart => "backfill_start",
            Self::BackfillSuccess => "backfill_success",
            Self::BackfillError => "backfill_error",
            Self::CacheSyncStart => "cache_sync_start",
            Self::CacheSourceSuccess => "cache_source_success",
            Self::CacheSourceError => "cache_source_error",
            Self::CacheSyncComplete => "cache_sync_complete",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of the sync event log.
///
/// Serialized as a single JSON object per line: `{ts, type, message, data}`. `ts` is only
/// `None` for degraded records produced when reading back a line that was not valid JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SyncEvent {
    pub ts: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default = "empty_data")]
    pub data: Value,
}

impl SyncEvent {
    /// Creates an event stamped with the current time.
    ///
    /// `data` is expected to be a JSON object; anything else is replaced by an empty object.
    pub fn new(kind: EventType, message: impl Into<String>, data: Value) -> Self {
        Self {
            ts: Some(Utc::now()),
            kind: kind.as_str().to_string(),
            message: message.into(),
            data: if data.is_object() { data } else { empty_data() },
        }
    }

    /// Degraded record standing in for an unparsable log line.
    pub fn raw(line: impl Into<String>) -> Self {
        Self {
            ts: None,
            kind: "raw".to_string(),
            message: line.into(),
            data: empty_data(),
        }
    }
}

fn empty_data() -> Value {
    Value::Object(serde_json::Map::new())
}
