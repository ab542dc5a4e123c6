//! Synchronization core for the ISP reporting application.
//!
//! This module contains the whole synchronization layer: source registry and row fetching
//! against the MariaDB sources, the structured sync event log, the reference cache store
//! repositories, the BigQuery warehouse client, and the sync services that tie them
//! together. The `command` module exposes each sync as an invokable CLI operation.

pub mod command;
pub mod config;
pub mod data;
pub mod error;
pub mod event_log;
pub mod model;
pub mod service;
pub mod source;
pub mod startup;
pub mod util;
pub mod warehouse;
