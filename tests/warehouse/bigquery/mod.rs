//! Tests for BigQueryClient against the mock warehouse API.

mod access_token;
mod create_table;
mod delete_table;
mod execute;
mod load_csv;

use std::{io::Write, time::Duration};

use isp_report_sync::sync::{
    config::WarehouseConfig,
    warehouse::{bigquery::BigQueryClient, TableId},
};
use sync_test_utils::prelude::*;
use tempfile::NamedTempFile;

fn config(test: &TestContext, access_token: Option<&str>) -> WarehouseConfig {
    WarehouseConfig {
        project: TEST_PROJECT.to_string(),
        dataset: TEST_DATASET.to_string(),
        table: TEST_TABLE.to_string(),
        location: TEST_LOCATION.to_string(),
        legacy_table: None,
        api_url: test.server_url(),
        access_token: access_token.map(str::to_string),
    }
}

/// Client authenticating with the static test token and polling without delay.
fn client(test: &TestContext) -> BigQueryClient {
    BigQueryClient::new(&config(test, Some(TEST_ACCESS_TOKEN)))
        .expect("Failed to build BigQuery client")
        .with_poll_interval(Duration::from_millis(1))
}

fn table(name: &str) -> TableId {
    TableId::new(TEST_PROJECT, TEST_DATASET, name)
}

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create CSV file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write CSV file");
    file
}
