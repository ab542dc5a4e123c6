//! Cache relation rows inserted directly, bypassing the sync.

use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{CacheResellerModel, CacheServiceModel, CacheVispModel},
    TestContext,
};

impl TestContext {
    pub fn cache<'a>(&'a self) -> CacheFixtures<'a> {
        CacheFixtures { setup: self }
    }
}

pub struct CacheFixtures<'a> {
    pub setup: &'a TestContext,
}

impl<'a> CacheFixtures<'a> {
    /// Insert a reseller row tagged with `source_name`.
    ///
    /// The row is enabled and its normalized name is the trimmed lowercase `name`.
    pub async fn insert_reseller(
        &self,
        source_name: &str,
        source_id: i64,
        name: &str,
    ) -> Result<CacheResellerModel, TestError> {
        Ok(
            entity::prelude::CacheReseller::insert(entity::cache_reseller::ActiveModel {
                source_name: ActiveValue::Set(source_name.to_string()),
                source_id: ActiveValue::Set(source_id),
                name: ActiveValue::Set(name.to_string()),
                name_norm: ActiveValue::Set(name.trim().to_lowercase()),
                is_enabled: ActiveValue::Set(true),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_visp(
        &self,
        source_name: &str,
        source_id: i64,
        name: &str,
    ) -> Result<CacheVispModel, TestError> {
        Ok(
            entity::prelude::CacheVisp::insert(entity::cache_visp::ActiveModel {
                source_name: ActiveValue::Set(source_name.to_string()),
                source_id: ActiveValue::Set(source_id),
                name: ActiveValue::Set(name.to_string()),
                is_enabled: ActiveValue::Set(true),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an enabled, non-deleted service visible to all resellers and VISPs.
    pub async fn insert_service(
        &self,
        source_name: &str,
        source_id: i64,
        name: &str,
    ) -> Result<CacheServiceModel, TestError> {
        Ok(
            entity::prelude::CacheService::insert(entity::cache_service::ActiveModel {
                source_name: ActiveValue::Set(source_name.to_string()),
                source_id: ActiveValue::Set(source_id),
                name: ActiveValue::Set(name.to_string()),
                is_enabled: ActiveValue::Set(true),
                is_deleted: ActiveValue::Set(false),
                reseller_access: ActiveValue::Set("All".to_string()),
                visp_access: ActiveValue::Set("All".to_string()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
