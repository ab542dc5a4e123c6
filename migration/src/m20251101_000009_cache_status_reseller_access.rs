use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_STATUS_RESELLER_ACCESS_SOURCE_NAME: &str = "idx_cache_status_reseller_access_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheStatusResellerAccess::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheStatusResellerAccess::Id))
                    .col(string(CacheStatusResellerAccess::SourceName))
                    .col(big_integer(CacheStatusResellerAccess::SourceId))
                    .col(big_integer(CacheStatusResellerAccess::StatusId))
                    .col(big_integer(CacheStatusResellerAccess::ResellerId))
                    .col(boolean(CacheStatusResellerAccess::Checked))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_STATUS_RESELLER_ACCESS_SOURCE_NAME)
                    .table(CacheStatusResellerAccess::Table)
                    .col(CacheStatusResellerAccess::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_STATUS_RESELLER_ACCESS_SOURCE_NAME)
                    .table(CacheStatusResellerAccess::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheStatusResellerAccess::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheStatusResellerAccess {
    Table,
    Id,
    SourceName,
    SourceId,
    StatusId,
    ResellerId,
    Checked,
}
