//! Tests for BigQueryClient::delete_table.

use isp_report_sync::sync::{error::warehouse::WarehouseError, warehouse::Warehouse};
use sync_test_utils::prelude::*;

use super::{client, table};

fn table_path(name: &str) -> String {
    format!(
        "/bigquery/v2/projects/{}/datasets/{}/tables/{}",
        TEST_PROJECT, TEST_DATASET, name
    )
}

/// Tests deleting an existing stage table.
///
/// Expected: Ok with one delete request
#[tokio::test]
async fn deletes_table() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table_delete_endpoint("report_user_service_stage_", 1)
        .build()
        .await?;

    let result = client(&test)
        .delete_table(&table("report_user_service_stage_abc123"))
        .await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests deleting a table that does not exist.
///
/// Expected: Ok
#[tokio::test]
async fn missing_table_is_not_an_error() -> Result<(), TestError> {
    let path = table_path("gone");
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("DELETE", path.as_str())
                .with_status(404)
                .with_body(r#"{"error": {"code": 404, "message": "Not found: Table"}}"#)
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = client(&test).delete_table(&table("gone")).await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests a refused deletion.
///
/// Expected: Err(WarehouseError::Api) with status 403
#[tokio::test]
async fn fails_on_forbidden() -> Result<(), TestError> {
    let path = table_path("locked");
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("DELETE", path.as_str())
                .with_status(403)
                .with_body(r#"{"error": {"code": 403, "message": "Access Denied"}}"#)
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = client(&test).delete_table(&table("locked")).await;

    match result {
        Err(WarehouseError::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Access Denied");
        }
        other => panic!("expected API error, got {:?}", other),
    }
    test.assert_mocks();

    Ok(())
}
