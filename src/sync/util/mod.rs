//! Helpers shared by the sync services and commands.

pub mod time;
