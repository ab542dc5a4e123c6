use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_SERVICE_VISP_ACCESS_SOURCE_NAME: &str = "idx_cache_service_visp_access_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheServiceVispAccess::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheServiceVispAccess::Id))
                    .col(string(CacheServiceVispAccess::SourceName))
                    .col(big_integer(CacheServiceVispAccess::SourceId))
                    .col(big_integer(CacheServiceVispAccess::ServiceId))
                    .col(big_integer(CacheServiceVispAccess::VispId))
                    .col(boolean(CacheServiceVispAccess::Checked))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_SERVICE_VISP_ACCESS_SOURCE_NAME)
                    .table(CacheServiceVispAccess::Table)
                    .col(CacheServiceVispAccess::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_SERVICE_VISP_ACCESS_SOURCE_NAME)
                    .table(CacheServiceVispAccess::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheServiceVispAccess::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheServiceVispAccess {
    Table,
    Id,
    SourceName,
    SourceId,
    ServiceId,
    VispId,
    Checked,
}
