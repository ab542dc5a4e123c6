//! Fixtures used during test execution.
//!
//! - `cache` - rows inserted straight into the cache relations
//! - `bigquery` - mock BigQuery REST endpoints

pub mod bigquery;
pub mod cache;
