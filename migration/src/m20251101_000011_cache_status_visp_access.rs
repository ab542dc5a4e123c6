use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_STATUS_VISP_ACCESS_SOURCE_NAME: &str = "idx_cache_status_visp_access_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheStatusVispAccess::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheStatusVispAccess::Id))
                    .col(string(CacheStatusVispAccess::SourceName))
                    .col(big_integer(CacheStatusVispAccess::SourceId))
                    .col(big_integer(CacheStatusVispAccess::StatusId))
                    .col(big_integer(CacheStatusVispAccess::VispId))
                    .col(boolean(CacheStatusVispAccess::Checked))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_STATUS_VISP_ACCESS_SOURCE_NAME)
                    .table(CacheStatusVispAccess::Table)
                    .col(CacheStatusVispAccess::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_STATUS_VISP_ACCESS_SOURCE_NAME)
                    .table(CacheStatusVispAccess::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheStatusVispAccess::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheStatusVispAccess {
    Table,
    Id,
    SourceName,
    SourceId,
    StatusId,
    VispId,
    Checked,
}
