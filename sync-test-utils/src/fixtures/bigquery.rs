//! Mock BigQuery REST endpoints.
//!
//! Paths mirror the BigQuery v2 API relative to the mock server URL, which tests pass to
//! the warehouse client as its API base URL. Every endpoint requires the
//! [`TEST_ACCESS_TOKEN`] bearer token and accepts any query string.

use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{
    constant::{TEST_ACCESS_TOKEN, TEST_DATASET, TEST_LOCATION, TEST_PROJECT},
    TestContext,
};

impl TestContext {
    pub fn bigquery<'a>(&'a mut self) -> BigQueryFixtures<'a> {
        BigQueryFixtures { setup: self }
    }
}

pub struct BigQueryFixtures<'a> {
    pub setup: &'a mut TestContext,
}

fn bearer() -> String {
    format!("Bearer {}", TEST_ACCESS_TOKEN)
}

/// Job resource body with the given status object.
pub fn job_body(job_id: &str, status: serde_json::Value) -> String {
    json!({
        "jobReference": {
            "projectId": TEST_PROJECT,
            "jobId": job_id,
            "location": TEST_LOCATION,
        },
        "status": status,
    })
    .to_string()
}

impl<'a> BigQueryFixtures<'a> {
    /// Multipart load job upload that completes immediately.
    pub fn create_load_job_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.load_job_endpoint(json!({"state": "DONE"}), expected_requests)
    }

    /// Multipart load job upload that completes with `message` as its error result.
    pub fn create_failed_load_job_endpoint(
        &mut self,
        message: &str,
        expected_requests: usize,
    ) -> Mock {
        self.load_job_endpoint(
            json!({
                "state": "DONE",
                "errorResult": {"reason": "invalid", "message": message},
            }),
            expected_requests,
        )
    }

    fn load_job_endpoint(&mut self, status: serde_json::Value, expected_requests: usize) -> Mock {
        let path = format!("/upload/bigquery/v2/projects/{}/jobs", TEST_PROJECT);

        self.setup
            .server
            .mock("POST", path.as_str())
            .match_query(Matcher::Any)
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(job_body("job_load", status))
            .expect(expected_requests)
            .create()
    }

    /// Query job that completes within the initial request.
    pub fn create_query_endpoint(&mut self, expected_requests: usize) -> Mock {
        let path = format!("/bigquery/v2/projects/{}/queries", TEST_PROJECT);

        self.setup
            .server
            .mock("POST", path.as_str())
            .match_query(Matcher::Any)
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "jobReference": {
                        "projectId": TEST_PROJECT,
                        "jobId": "job_query",
                        "location": TEST_LOCATION,
                    },
                    "jobComplete": true,
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// Query request rejected by the API with `message`.
    pub fn create_failed_query_endpoint(&mut self, message: &str, expected_requests: usize) -> Mock {
        let path = format!("/bigquery/v2/projects/{}/queries", TEST_PROJECT);

        self.setup
            .server
            .mock("POST", path.as_str())
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "error": {"code": 400, "message": message, "status": "INVALID_ARGUMENT"},
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// Table creation in the test dataset.
    pub fn create_table_insert_endpoint(&mut self, expected_requests: usize) -> Mock {
        let path = format!(
            "/bigquery/v2/projects/{}/datasets/{}/tables",
            TEST_PROJECT, TEST_DATASET
        );

        self.setup
            .server
            .mock("POST", path.as_str())
            .match_query(Matcher::Any)
            .match_header("authorization", bearer().as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{}")
            .expect(expected_requests)
            .create()
    }

    /// Deletion of any table in the test dataset whose name starts with `table_prefix`.
    pub fn create_table_delete_endpoint(
        &mut self,
        table_prefix: &str,
        expected_requests: usize,
    ) -> Mock {
        let pattern = format!(
            r"^/bigquery/v2/projects/{}/datasets/{}/tables/{}[A-Za-z0-9_]*$",
            TEST_PROJECT, TEST_DATASET, table_prefix
        );

        self.setup
            .server
            .mock("DELETE", Matcher::Regex(pattern))
            .match_query(Matcher::Any)
            .match_header("authorization", bearer().as_str())
            .with_status(204)
            .expect(expected_requests)
            .create()
    }
}
