//! Sync services.
//!
//! Each service drives one data flow: the reference cache sync into the cache store, the
//! full and windowed fact syncs into the warehouse, and the backfill merge of legacy and
//! live fact rows. Services reach the sources, the warehouse and the event log only through
//! their traits so tests can substitute in-memory doubles.

pub mod backfill;
pub mod reference_cache;
pub mod warehouse_sync;
