//! Progress lines printed while a sync runs.

use std::time::Duration;

use serde_json::Value;

use crate::sync::{
    event_log::EventSink,
    model::event::{EventType, SyncEvent},
    util::time::format_elapsed,
};

/// Event sink printing a progress line for per-source and staging events before handing
/// every event on to `inner`.
pub struct ProgressLog<'a> {
    inner: &'a dyn EventSink,
    label: &'static str,
}

impl<'a> ProgressLog<'a> {
    pub fn new(inner: &'a dyn EventSink, label: &'static str) -> Self {
        Self { inner, label }
    }
}

impl EventSink for ProgressLog<'_> {
    fn record(&self, event: SyncEvent) {
        if let Some(line) = progress_line(self.label, &event) {
            println!("{}", line);
        }

        self.inner.record(event);
    }
}

fn text(data: &Value, key: &str) -> String {
    match &data[key] {
        Value::String(value) => value.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn elapsed(data: &Value) -> String {
    format_elapsed(Duration::from_millis(data["elapsed_ms"].as_u64().unwrap_or(0)))
}

/// The line printed for `event`, if its type is reported as progress.
pub fn progress_line(label: &str, event: &SyncEvent) -> Option<String> {
    let data = &event.data;
    let kind = event.kind.as_str();

    let line = if kind == EventType::SourceStart.as_str() {
        format!("{}: fetching source={}", label, text(data, "source"))
    } else if kind == EventType::SourceSuccess.as_str()
        || kind == EventType::WindowSourceSuccess.as_str()
    {
        format!(
            "{}: source={} rows={} elapsed={}",
            label,
            text(data, "source"),
            text(data, "rows"),
            elapsed(data)
        )
    } else if kind == EventType::SourceError.as_str()
        || kind == EventType::WindowSourceError.as_str()
    {
        format!(
            "{}: source={} failed after {}: {}",
            label,
            text(data, "source"),
            elapsed(data),
            text(data, "error")
        )
    } else if kind == EventType::WindowStageCreate.as_str() {
        format!("{}: staging rows in {}", label, text(data, "stage_table"))
    } else if kind == EventType::CacheSourceSuccess.as_str() {
        let mode = if data["dry_run"].as_bool().unwrap_or(false) {
            "fetched (dry-run)"
        } else {
            "replaced"
        };
        format!("{}: source={} {}", label, text(data, "source"), mode)
    } else if kind == EventType::CacheSourceError.as_str() {
        format!(
            "{}: source={} failed: {}",
            label,
            text(data, "source"),
            text(data, "error")
        )
    } else {
        return None;
    };

    Some(line)
}
