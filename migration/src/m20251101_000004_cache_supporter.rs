use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_SUPPORTER_SOURCE_NAME: &str = "idx_cache_supporter_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheSupporter::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheSupporter::Id))
                    .col(string(CacheSupporter::SourceName))
                    .col(big_integer(CacheSupporter::SourceId))
                    .col(string(CacheSupporter::Name))
                    .col(boolean(CacheSupporter::IsEnabled))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_SUPPORTER_SOURCE_NAME)
                    .table(CacheSupporter::Table)
                    .col(CacheSupporter::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_SUPPORTER_SOURCE_NAME)
                    .table(CacheSupporter::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheSupporter::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheSupporter {
    Table,
    Id,
    SourceName,
    SourceId,
    Name,
    IsEnabled,
}
