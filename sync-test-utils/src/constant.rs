//! Warehouse identifiers and credentials used by every test.
//!
//! None of these point at real resources; the warehouse API is always the mockito server.

/// Project id of the mock warehouse.
pub static TEST_PROJECT: &str = "test-project";

/// Dataset holding the target, legacy and stage tables.
pub static TEST_DATASET: &str = "reports";

/// Default fact table name.
pub static TEST_TABLE: &str = "report_user_service";

/// Job location sent with every load and query job.
pub static TEST_LOCATION: &str = "US";

/// Static bearer token expected by the mock endpoints.
pub static TEST_ACCESS_TOKEN: &str = "test-token";
