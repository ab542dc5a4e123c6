use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_CENTER_SOURCE_NAME: &str = "idx_cache_center_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheCenter::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheCenter::Id))
                    .col(string(CacheCenter::SourceName))
                    .col(big_integer(CacheCenter::SourceId))
                    .col(string(CacheCenter::Name))
                    .col(boolean(CacheCenter::IsEnabled))
                    .col(string(CacheCenter::VispAccess))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_CENTER_SOURCE_NAME)
                    .table(CacheCenter::Table)
                    .col(CacheCenter::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_CENTER_SOURCE_NAME)
                    .table(CacheCenter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheCenter::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheCenter {
    Table,
    Id,
    SourceName,
    SourceId,
    Name,
    IsEnabled,
    VispAccess,
}
