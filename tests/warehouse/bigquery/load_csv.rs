//! Tests for BigQueryClient::load_csv.

use isp_report_sync::sync::{
    error::warehouse::WarehouseError,
    warehouse::{Warehouse, WriteDisposition, FACT_SCHEMA},
};
use mockito::Matcher;
use serde_json::json;
use sync_test_utils::{fixtures::bigquery::job_body, prelude::*};

use super::{client, csv_file, table};

/// Tests a load job that is done as soon as it is submitted.
///
/// Expected: Ok with a single upload request
#[tokio::test]
async fn uploads_csv_and_completes() -> Result<(), TestError> {
    let test = TestBuilder::new().with_load_job_endpoint(1).build().await?;
    let file = csv_file("id,username\n1,alice\n");

    let result = client(&test)
        .load_csv(
            &table(TEST_TABLE),
            file.path(),
            &FACT_SCHEMA,
            WriteDisposition::Truncate,
        )
        .await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests the multipart request carries the job configuration followed by the CSV.
///
/// Expected: Ok, with the disposition, destination, quoted-newline support and rows all
/// present in the body
#[tokio::test]
async fn sends_configuration_and_rows() -> Result<(), TestError> {
    let path = format!("/upload/bigquery/v2/projects/{}/jobs", TEST_PROJECT);
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("POST", path.as_str())
                .match_query(Matcher::UrlEncoded(
                    "uploadType".into(),
                    "multipart".into(),
                ))
                .match_header(
                    "content-type",
                    Matcher::Regex("^multipart/related; boundary=".into()),
                )
                .match_body(Matcher::AllOf(vec![
                    Matcher::Regex(r#""writeDisposition":"WRITE_APPEND""#.into()),
                    Matcher::Regex(r#""tableId":"report_user_service""#.into()),
                    Matcher::Regex(r#""skipLeadingRows":1"#.into()),
                    Matcher::Regex(r#""allowQuotedNewlines":true"#.into()),
                    Matcher::Regex("id,username\n1,\"alice\nsmith\"\n".into()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(job_body("job_load", json!({"state": "DONE"})))
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let file = csv_file("id,username\n1,\"alice\nsmith\"\n");

    let result = client(&test)
        .load_csv(
            &table(TEST_TABLE),
            file.path(),
            &FACT_SCHEMA,
            WriteDisposition::Append,
        )
        .await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests a running load job is polled until it is done.
///
/// Expected: Ok after one status request
#[tokio::test]
async fn polls_running_job() -> Result<(), TestError> {
    let job_path = format!("/bigquery/v2/projects/{}/jobs/job_load", TEST_PROJECT);
    let upload_path = format!("/upload/bigquery/v2/projects/{}/jobs", TEST_PROJECT);
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("POST", upload_path.as_str())
                .match_query(Matcher::Any)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(job_body("job_load", json!({"state": "RUNNING"})))
                .expect(1)
                .create()
        })
        .with_mock_endpoint(move |server| {
            server
                .mock("GET", job_path.as_str())
                .match_query(Matcher::UrlEncoded("location".into(), TEST_LOCATION.into()))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(job_body("job_load", json!({"state": "DONE"})))
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let file = csv_file("id\n1\n");

    let result = client(&test)
        .load_csv(
            &table(TEST_TABLE),
            file.path(),
            &FACT_SCHEMA,
            WriteDisposition::Truncate,
        )
        .await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests a load job finishing with an error result.
///
/// Expected: Err(WarehouseError::Job) carrying the job id and message
#[tokio::test]
async fn fails_on_job_error_result() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let mock = test
        .bigquery()
        .create_failed_load_job_endpoint("CSV row 2 has too many columns", 1);
    test.track(mock);
    let file = csv_file("id\n1,2\n");

    let result = client(&test)
        .load_csv(
            &table(TEST_TABLE),
            file.path(),
            &FACT_SCHEMA,
            WriteDisposition::Truncate,
        )
        .await;

    match result {
        Err(WarehouseError::Job { job_id, message }) => {
            assert_eq!(job_id, "job_load");
            assert!(message.contains("too many columns"));
        }
        other => panic!("expected job error, got {:?}", other),
    }
    test.assert_mocks();

    Ok(())
}

/// Tests a missing stage file fails before any request.
///
/// Expected: Err(WarehouseError::Io)
#[tokio::test]
async fn fails_on_missing_file() -> Result<(), TestError> {
    let test = TestBuilder::new().with_load_job_endpoint(0).build().await?;
    let file = csv_file("id\n");
    let path = file.path().to_path_buf();
    drop(file);

    let result = client(&test)
        .load_csv(
            &table(TEST_TABLE),
            &path,
            &FACT_SCHEMA,
            WriteDisposition::Truncate,
        )
        .await;

    assert!(matches!(result, Err(WarehouseError::Io(_))));
    test.assert_mocks();

    Ok(())
}
