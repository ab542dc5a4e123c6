//! Test utilities for the ISP report sync workspace.
//!
//! Tests are set up in two phases: a [`TestBuilder`] declares tables, cache fixtures and
//! mock warehouse endpoints, then `build()` returns a [`TestContext`] holding an in-memory
//! SQLite database and a mockito server standing in for the BigQuery REST API.
//!
//! This crate does not depend on the main crate, so helpers that need its types (fake
//! fetchers, recording warehouses) live next to the code they test.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{constant::*, TestBuilder, TestContext, TestError};
}
