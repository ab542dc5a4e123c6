//! Cache store repositories.

pub mod cache;
