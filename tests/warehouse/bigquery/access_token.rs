//! Tests for tokens requested from the metadata server.

use std::time::Duration;

use isp_report_sync::sync::{
    error::warehouse::WarehouseError,
    warehouse::{bigquery::BigQueryClient, Warehouse},
};
use serde_json::json;
use sync_test_utils::prelude::*;

use super::config;

fn metadata_client(test: &TestContext) -> BigQueryClient {
    BigQueryClient::new(&config(test, None))
        .expect("Failed to build BigQuery client")
        .with_metadata_url(format!("{}/token", test.server_url()))
        .with_poll_interval(Duration::from_millis(1))
}

/// Tests the metadata token is fetched once and reused for later requests.
///
/// Expected: Ok for both queries with a single token request
#[tokio::test]
async fn fetches_and_caches_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/token")
                .match_header("metadata-flavor", "Google")
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "access_token": TEST_ACCESS_TOKEN,
                        "expires_in": 3599,
                        "token_type": "Bearer",
                    })
                    .to_string(),
                )
                .expect(1)
                .create()
        })
        .with_query_endpoint(2)
        .build()
        .await?;
    let client = metadata_client(&test);

    let first = client.execute("SELECT 1", &[]).await;
    let second = client.execute("SELECT 2", &[]).await;

    assert!(first.is_ok(), "{:?}", first);
    assert!(second.is_ok(), "{:?}", second);
    test.assert_mocks();

    Ok(())
}

/// Tests an unavailable metadata server.
///
/// Expected: Err(WarehouseError::Auth) without calling the API
#[tokio::test]
async fn fails_when_metadata_server_refuses() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/token")
                .with_status(500)
                .expect(1)
                .create()
        })
        .with_query_endpoint(0)
        .build()
        .await?;

    let result = metadata_client(&test).execute("SELECT 1", &[]).await;

    assert!(matches!(result, Err(WarehouseError::Auth(_))));
    test.assert_mocks();

    Ok(())
}
