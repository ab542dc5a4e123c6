use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_SERVICE_SOURCE_NAME: &str = "idx_cache_service_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheService::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheService::Id))
                    .col(string(CacheService::SourceName))
                    .col(big_integer(CacheService::SourceId))
                    .col(string(CacheService::Name))
                    .col(boolean(CacheService::IsEnabled))
                    .col(boolean(CacheService::IsDeleted))
                    .col(string(CacheService::ResellerAccess))
                    .col(string(CacheService::VispAccess))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_SERVICE_SOURCE_NAME)
                    .table(CacheService::Table)
                    .col(CacheService::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_SERVICE_SOURCE_NAME)
                    .table(CacheService::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheService::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheService {
    Table,
    Id,
    SourceName,
    SourceId,
    Name,
    IsEnabled,
    IsDeleted,
    ResellerAccess,
    VispAccess,
}
