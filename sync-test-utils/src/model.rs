//! Type aliases for the cache entity models used by fixtures.

pub type CacheResellerModel = entity::cache_reseller::Model;

pub type CacheVispModel = entity::cache_visp::Model;

pub type CacheServiceModel = entity::cache_service::Model;
