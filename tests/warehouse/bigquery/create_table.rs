//! Tests for BigQueryClient::create_table.

use isp_report_sync::sync::warehouse::{Warehouse, RESELLER_MAP_SCHEMA};
use mockito::Matcher;
use serde_json::json;
use sync_test_utils::prelude::*;

use super::{client, table};

/// Tests an empty table is created in the dataset of its identifier.
///
/// Expected: Ok with one table insert request
#[tokio::test]
async fn creates_table() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_table_insert_endpoint(1)
        .build()
        .await?;

    let result = client(&test)
        .create_table(&table("report_user_service_reseller_map_x"), &RESELLER_MAP_SCHEMA)
        .await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}

/// Tests the request names the table and carries its schema.
///
/// Expected: Ok, with the table reference and field names in the body
#[tokio::test]
async fn sends_reference_and_schema() -> Result<(), TestError> {
    let path = format!(
        "/bigquery/v2/projects/{}/datasets/{}/tables",
        TEST_PROJECT, TEST_DATASET
    );
    let test = TestBuilder::new()
        .with_mock_endpoint(move |server| {
            server
                .mock("POST", path.as_str())
                .match_body(Matcher::AllOf(vec![
                    Matcher::PartialJson(json!({
                        "tableReference": {
                            "projectId": TEST_PROJECT,
                            "datasetId": TEST_DATASET,
                            "tableId": "map_stage",
                        }
                    })),
                    Matcher::Regex(r#""name":"creator_norm""#.into()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body("{}")
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = client(&test)
        .create_table(&table("map_stage"), &RESELLER_MAP_SCHEMA)
        .await;

    assert!(result.is_ok(), "{:?}", result);
    test.assert_mocks();

    Ok(())
}
