use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_RESELLER_SOURCE_NAME: &str = "idx_cache_reseller_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheReseller::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheReseller::Id))
                    .col(string(CacheReseller::SourceName))
                    .col(big_integer(CacheReseller::SourceId))
                    .col(string(CacheReseller::Name))
                    .col(string(CacheReseller::NameNorm))
                    .col(boolean(CacheReseller::IsEnabled))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_RESELLER_SOURCE_NAME)
                    .table(CacheReseller::Table)
                    .col(CacheReseller::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_RESELLER_SOURCE_NAME)
                    .table(CacheReseller::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheReseller::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheReseller {
    Table,
    Id,
    SourceName,
    SourceId,
    Name,
    NameNorm,
    IsEnabled,
}
