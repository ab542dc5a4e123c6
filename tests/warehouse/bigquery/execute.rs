//! Tests for BigQueryClient::execute.

use chrono::NaiveDate;
use isp_report_sync::sync::{
    error::warehouse::WarehouseError,
    warehouse::{QueryParameter, Warehouse},
};
use mockito::Matcher;
use serde_json::json;
use sync_test_utils::prelude::*;

use super::client;

fn cutoff() -> QueryParameter {
    QueryParameter::date(
        "cutoff_date",
        NaiveDate::from_ymd_opt(2025, 10, 31).expect("valid date"),
    )
}

/// Tests a script completing within the initial request.
///
/// Expected: Ok with a single query request
#[tokio::test]
async fn completes_immediately() -> Result<(), TestError> {
    let test = TestBuilder::new().with_query_endpoint(1).build().await?;

    let result = client(&test).execute("SELECT 1", &[]).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests parameters are sent as named DATE parameters with standard SQL.
///
/// Expected: Ok, with the request body matching the named parameter layout
#[tokio::test]
async fn sends_named_date_parameters() -> Result<(), TestError> {
    let path = format!("/bigquery/v2/projects/{}/queries", TEST_PROJECT);
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("POST", path.as_str())
                .match_body(Matcher::AllOf(vec![
                    Matcher::PartialJson(json!({
                        "query": "SELECT @cutoff_date",
                        "useLegacySql": false,
                        "parameterMode": "NAMED",
                        "location": TEST_LOCATION,
                    })),
                    Matcher::Regex(r#""name":"cutoff_date""#.into()),
                    Matcher::Regex(r#""type":"DATE""#.into()),
                    Matcher::Regex(r#""value":"2025-10-31""#.into()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "jobReference": {"projectId": TEST_PROJECT, "jobId": "job_query"},
                        "jobComplete": true,
                    })
                    .to_string(),
                )
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = client(&test)
        .execute("SELECT @cutoff_date", &[cutoff()])
        .await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests an incomplete query is polled through the query results endpoint.
///
/// Expected: Ok after one results request
#[tokio::test]
async fn polls_until_complete() -> Result<(), TestError> {
    let path = format!("/bigquery/v2/projects/{}/queries", TEST_PROJECT);
    let results_path = format!("{}/job_query", path);
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("POST", path.as_str())
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "jobReference": {"projectId": TEST_PROJECT, "jobId": "job_query", "location": TEST_LOCATION},
                        "jobComplete": false,
                    })
                    .to_string(),
                )
                .expect(1)
                .create()
        })
        .with_mock_endpoint(move |server| {
            server
                .mock("GET", results_path.as_str())
                .match_query(Matcher::AllOf(vec![
                    Matcher::UrlEncoded("location".into(), TEST_LOCATION.into()),
                    Matcher::UrlEncoded("maxResults".into(), "0".into()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "jobReference": {"projectId": TEST_PROJECT, "jobId": "job_query"},
                        "jobComplete": true,
                    })
                    .to_string(),
                )
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = client(&test).execute("SELECT 1", &[]).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests a rejected query surfaces the API status and message.
///
/// Expected: Err(WarehouseError::Api) with status 400
#[tokio::test]
async fn fails_on_rejected_query() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let mock = test
        .bigquery()
        .create_failed_query_endpoint("Unrecognized name: CreatDate", 1);
    test.track(mock);

    let result = client(&test).execute("SELECT CreatDate", &[]).await;

    match result {
        Err(WarehouseError::Api { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Unrecognized name: CreatDate");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    test.assert_mocks();

    Ok(())
}

/// Tests a success status with a body that is not a query response.
///
/// Expected: Err(WarehouseError::Decode)
#[tokio::test]
async fn fails_on_unexpected_body() -> Result<(), TestError> {
    let path = format!("/bigquery/v2/projects/{}/queries", TEST_PROJECT);
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("POST", path.as_str())
                .with_status(200)
                .with_body("not json")
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = client(&test).execute("SELECT 1", &[]).await;

    assert!(matches!(result, Err(WarehouseError::Decode(_))));
    test.assert_mocks();

    Ok(())
}
