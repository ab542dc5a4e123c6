//! Structured sync event log.
//!
//! Sync services record lifecycle events through the [`EventSink`] trait. The default
//! backend, [`FileEventLog`], appends one JSON object per line to a file that is never
//! rewritten. Recording never fails from the caller's point of view: write errors are
//! logged and dropped so sync outcomes never depend on the log.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde_json::Value;

use crate::sync::model::event::{EventType, SyncEvent};

/// Destination for sync lifecycle events.
pub trait EventSink: Send + Sync {
    fn record(&self, event: SyncEvent);

    /// Convenience wrapper building the event with the current timestamp.
    fn emit(&self, kind: EventType, message: &str, data: Value) {
        self.record(SyncEvent::new(kind, message, data));
    }
}

/// Append-only JSON lines file.
pub struct FileEventLog {
    path: PathBuf,
    // Serializes appends from concurrent tasks so lines never interleave.
    lock: Mutex<()>,
}

impl FileEventLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &SyncEvent) -> io::Result<()> {
        let line = serde_json::to_string(event)?;

        let _guard = self
            .lock
            .lock()
            .map_err(|_| io::Error::other("event log lock poisoned"))?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)
    }
}

impl EventSink for FileEventLog {
    fn record(&self, event: SyncEvent) {
        if let Err(e) = self.append(&event) {
            tracing::error!(
                path = %self.path.display(),
                event_type = %event.kind,
                "Failed to write sync event: {}",
                e
            );
        }
    }
}

/// Reads the last `limit` records of the event log at `path`.
///
/// A zero limit or a missing file gives an empty list. Blank lines are skipped and lines
/// that are not valid event JSON, including lines that are not valid UTF-8, are returned as
/// degraded `raw` records.
pub fn read_tail(path: &Path, limit: usize) -> io::Result<Vec<SyncEvent>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    // Lines are decoded one by one so invalid UTF-8 only degrades its own line.
    let lines: Vec<&[u8]> = contents
        .strip_suffix(b"\n")
        .unwrap_or(&contents)
        .split(|byte| *byte == b'\n')
        .collect();
    let start = lines.len().saturating_sub(limit);

    Ok(lines[start..]
        .iter()
        .map(|line| String::from_utf8_lossy(line))
        .filter_map(|line| {
            let line = line.trim();
            (!line.is_empty()).then(|| {
                serde_json::from_str(line).unwrap_or_else(|_| SyncEvent::raw(line))
            })
        })
        .collect())
}

#[cfg(test)]
mod tests;
