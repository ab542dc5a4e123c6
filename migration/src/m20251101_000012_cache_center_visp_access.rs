use sea_orm_migration::{prelude::*, schema::*};

static IDX_CACHE_CENTER_VISP_ACCESS_SOURCE_NAME: &str = "idx_cache_center_visp_access_source_name";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CacheCenterVispAccess::Table)
                    .if_not_exists()
                    .col(pk_auto(CacheCenterVispAccess::Id))
                    .col(string(CacheCenterVispAccess::SourceName))
                    .col(big_integer(CacheCenterVispAccess::SourceId))
                    .col(big_integer(CacheCenterVispAccess::CenterId))
                    .col(big_integer(CacheCenterVispAccess::VispId))
                    .col(boolean(CacheCenterVispAccess::Checked))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_CACHE_CENTER_VISP_ACCESS_SOURCE_NAME)
                    .table(CacheCenterVispAccess::Table)
                    .col(CacheCenterVispAccess::SourceName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_CACHE_CENTER_VISP_ACCESS_SOURCE_NAME)
                    .table(CacheCenterVispAccess::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CacheCenterVispAccess::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum CacheCenterVispAccess {
    Table,
    Id,
    SourceName,
    SourceId,
    CenterId,
    VispId,
    Checked,
}
