use std::fs;

use serde_json::json;
use tempfile::TempDir;

use super::*;

mod read_tail;

fn log_in(dir: &TempDir) -> FileEventLog {
    FileEventLog::new(dir.path().join("sync_logs.jsonl"))
}
