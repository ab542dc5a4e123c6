use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_RESELLER_PERMIT_SOURCE_NAME: &str = "idx_cache_reseller_permit_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheResellerPermit::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheResellerPermit::Id))
                    .col(string(CacheResellerPermit::SourceName))
                    .col(big_integer(CacheResellerPermit::SourceId))
                    .col(big_integer(CacheResellerPermit::ResellerId))
                    .col(big_integer(CacheResellerPermit::VispId))
                    .col(big_integer_null(CacheResellerPermit::PermitItemId))
                    .col(boolean(CacheResellerPermit::IsPermit))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_RESELLER_PERMIT_SOURCE_NAME)
                    .table(CacheResellerPermit::Table)
                    .col(CacheResellerPermit::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_RESELLER_PERMIT_SOURCE_NAME)
                    .table(CacheResellerPermit::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheResellerPermit::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheResellerPermit {
    Table,
    Id,
    SourceName,
    SourceId,
    ResellerId,
    VispId,
    PermitItemId,
    IsPermit,
}
