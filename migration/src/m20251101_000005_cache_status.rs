use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_STATUS_SOURCE_NAME: &str = "idx_cache_status_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheStatus::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheStatus::Id))
                    .col(string(CacheStatus::SourceName))
                    .col(big_integer(CacheStatus::SourceId))
                    .col(string(CacheStatus::Name))
                    .col(boolean(CacheStatus::IsEnabled))
                    .col(string(CacheStatus::ResellerAccess))
                    .col(string(CacheStatus::VispAccess))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_STATUS_SOURCE_NAME)
                    .table(CacheStatus::Table)
                    .col(CacheStatus::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_STATUS_SOURCE_NAME)
                    .table(CacheStatus::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheStatus {
    Table,
    Id,
    SourceName,
    SourceId,
    Name,
    IsEnabled,
    ResellerAccess,
    VispAccess,
}
