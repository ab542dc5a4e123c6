use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_VISP_SOURCE_NAME: &str = "idx_cache_visp_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheVisp::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheVisp::Id))
                    .col(string(CacheVisp::SourceName))
                    .col(big_integer(CacheVisp::SourceId))
                    .col(string(CacheVisp::Name))
                    .col(boolean(CacheVisp::IsEnabled))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_VISP_SOURCE_NAME)
                    .table(CacheVisp::Table)
                    .col(CacheVisp::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_VISP_SOURCE_NAME)
                    .table(CacheVisp::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheVisp::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheVisp {
    Table,
    Id,
    SourceName,
    SourceId,
    Name,
    IsEnabled,
}
