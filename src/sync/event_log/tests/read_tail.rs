//! Tests for read_tail.

use super::*;

/// Tests reading the most recent records.
///
/// Expected: only the last `limit` events, oldest first
#[test]
fn returns_last_records_in_order() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    for i in 0..5 {
        log.emit(EventType::SourceSuccess, &format!("event {i}"), json!({"rows": i}));
    }

    let events = read_tail(log.path(), 2).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].message, "event 3");
    assert_eq!(events[1].message, "event 4");
    assert_eq!(events[1].kind, "source_success");
    assert_eq!(events[1].data["rows"], 4);
}

/// Tests that a zero limit and a missing file both give an empty list.
#[test]
fn zero_limit_or_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);

    assert!(read_tail(log.path(), 10).unwrap().is_empty());

    log.emit(EventType::SyncStart, "Starting BigQuery sync", json!({}));
    assert!(read_tail(log.path(), 0).unwrap().is_empty());
}

/// Tests that malformed lines are surfaced as degraded records and blank lines skipped.
///
/// Expected: the valid record, then a raw record holding the malformed line
#[test]
fn malformed_lines_become_raw_records() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sync_logs.jsonl");
    fs::write(
        &path,
        concat!(
            r#"{"ts":"2025-11-01T08:00:00.123456+00:00","type":"backfill_start","message":"Starting report_user_service backfill","data":{"cutoff_date":"2025-10-31"}}"#,
            "\n",
            "\n",
            "not json at all\n",
        ),
    )
    .unwrap();

    let events = read_tail(&path, 200).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, "backfill_start");
    assert!(events[0].ts.is_some());
    assert_eq!(events[1], SyncEvent::raw("not json at all"));
    assert_eq!(events[1].ts, None);
    assert_eq!(events[1].data, json!({}));
}

/// Tests that a line with invalid UTF-8 degrades alone instead of failing the read.
///
/// Expected: the valid record, then a raw record for the undecodable line
#[test]
fn invalid_utf8_line_becomes_raw_record() {
    let dir = TempDir::new().unwrap();
    let log = log_in(&dir);
    log.emit(EventType::WindowSyncSuccess, "Window sync complete", json!({"rows": 3}));

    let mut contents = fs::read(log.path()).unwrap();
    contents.extend_from_slice(b"\xff\xfe broken\n");
    fs::write(log.path(), contents).unwrap();

    let events = read_tail(log.path(), 10).unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].kind, "window_sync_success");
    assert_eq!(events[0].data["rows"], 3);
    assert_eq!(events[1].kind, "raw");
    assert_eq!(events[1].ts, None);
    assert!(events[1].message.ends_with(" broken"));
}

/// Tests that the limit counts lines from the end even when the last one has no newline.
#[test]
fn last_line_without_newline_is_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sync_logs.jsonl");
    fs::write(&path, "first\nsecond").unwrap();

    let events = read_tail(&path, 1).unwrap();

    assert_eq!(events, vec![SyncEvent::raw("second")]);
}
