//! Domain models shared by the fetchers, the repositories and the sync services.

pub mod event;
pub mod reference;
pub mod source;
pub mod user_service;
