use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_SERVICE_RESELLER_ACCESS_SOURCE_NAME: &str = "idx_cache_service_reseller_access_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheServiceResellerAccess::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheServiceResellerAccess::Id))
                    .col(string(CacheServiceResellerAccess::SourceName))
                    .col(big_integer(CacheServiceResellerAccess::SourceId))
                    .col(big_integer(CacheServiceResellerAccess::ServiceId))
                    .col(big_integer(CacheServiceResellerAccess::ResellerId))
                    .col(boolean(CacheServiceResellerAccess::Checked))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_SERVICE_RESELLER_ACCESS_SOURCE_NAME)
                    .table(CacheServiceResellerAccess::Table)
                    .col(CacheServiceResellerAccess::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_SERVICE_RESELLER_ACCESS_SOURCE_NAME)
                    .table(CacheServiceResellerAccess::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheServiceResellerAccess::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheServiceResellerAccess {
    Table,
    Id,
    SourceName,
    SourceId,
    ServiceId,
    ResellerId,
    Checked,
}
