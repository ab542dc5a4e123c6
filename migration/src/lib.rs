pub use sea_orm_migration::prelude::*;

mod m20251101_000001_cache_reseller;
mod m20251101_000002_cache_visp;
mod m20251101_000003_cache_center;
mod m20251101_000004_cache_supporter;
mod m20251101_000005_cache_status;
mod m20251101_000006_cache_service;
mod m20251101_000007_cache_reseller_permit;
mod m20251101_000008_cache_service_reseller_access;
mod m20251101_000009_cache_status_reseller_access;
mod m20251101_000010_cache_service_visp_access;
mod m20251101_000011_cache_status_visp_access;
mod m20251101_000012_cache_center_visp_access;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000001_cache_reseller::Migration),
            Box::new(m20251101_000002_cache_visp::Migration),
            Box::new(m20251101_000003_cache_center::Migration),
            Box::new(m20251101_000004_cache_supporter::Migration),
            Box::new(m20251101_000005_cache_status::Migration),
            Box::new(m20251101_000006_cache_service::Migration),
            Box::new(m20251101_000007_cache_reseller_permit::Migration),
            Box::new(m20251101_000008_cache_service_reseller_access::Migration),
            Box::new(m20251101_000009_cache_status_reseller_access::Migration),
            Box::new(m20251101_000010_cache_service_visp_access::Migration),
            Box::new(m20251101_000011_cache_status_visp_access::Migration),
            Box::new(m20251101_000012_cache_center_visp_access::Migration),
        ]
    }
}
