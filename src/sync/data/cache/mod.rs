//! Source-scoped reference cache repository.
//!
//! Every cache relation tags its rows with the source they were fetched from. A sync run
//! replaces the rows of one source wholesale: delete everything tagged with the source name,
//! then bulk insert the fresh snapshot. Callers run the replacement inside a transaction so
//! a failure leaves the source's previous rows in place.

pub mod rows;

use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use crate::sync::model::reference::{ReferenceSnapshot, TableCounts};

/// Cache entity whose rows carry a `source_name` provenance tag.
pub trait SourceScopedEntity: EntityTrait {
    fn source_name_column() -> Self::Column;
}

macro_rules! source_scoped {
    ($($module:ident),+ $(,)?) => {
        $(
            impl SourceScopedEntity for entity::$module::Entity {
                fn source_name_column() -> Self::Column {
                    entity::$module::Column::SourceName
                }
            }
        )+
    };
}

source_scoped!(
    cache_reseller,
    cache_visp,
    cache_center,
    cache_supporter,
    cache_status,
    cache_service,
    cache_reseller_permit,
    cache_service_reseller_access,
    cache_status_reseller_access,
    cache_service_visp_access,
    cache_status_visp_access,
    cache_center_visp_access,
);

pub struct CacheRepository<'a, C: ConnectionTrait> {
    db: &'a C,
    batch_size: usize,
}

impl<'a, C: ConnectionTrait> CacheRepository<'a, C> {
    /// Creates a repository inserting at most `batch_size` rows per statement.
    pub fn new(db: &'a C, batch_size: usize) -> Self {
        Self {
            db,
            batch_size: batch_size.max(1),
        }
    }

    /// Deletes every row of `E` tagged with `source_name`.
    pub async fn delete_by_source<E: SourceScopedEntity>(
        &self,
        source_name: &str,
    ) -> Result<u64, DbErr> {
        let result = E::delete_many()
            .filter(E::source_name_column().eq(source_name))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Bulk inserts `models` in chunks, silently dropping rows that conflict.
    pub async fn insert_chunked<A>(&self, models: Vec<A>) -> Result<u64, DbErr>
    where
        A: ActiveModelTrait + Send,
        A::Entity: SourceScopedEntity,
    {
        let mut inserted = 0;
        let mut models = models.into_iter().peekable();

        while models.peek().is_some() {
            let chunk: Vec<A> = models.by_ref().take(self.batch_size).collect();

            inserted += <A::Entity as EntityTrait>::insert_many(chunk)
                .on_conflict(OnConflict::new().do_nothing().to_owned())
                .exec_without_returning(self.db)
                .await?;
        }

        Ok(inserted)
    }

    /// Replaces the rows of `E` tagged with `source_name` by `models`.
    pub async fn replace_for_source<A>(&self, source_name: &str, models: Vec<A>) -> Result<u64, DbErr>
    where
        A: ActiveModelTrait + Send,
        A::Entity: SourceScopedEntity,
    {
        self.delete_by_source::<A::Entity>(source_name).await?;

        self.insert_chunked(models).await
    }

    /// Replaces every cache relation of `source_name` with the contents of `snapshot`.
    ///
    /// Returns the number of rows written per table after duplicate natural keys were
    /// dropped.
    pub async fn replace_snapshot(
        &self,
        source_name: &str,
        snapshot: &ReferenceSnapshot,
    ) -> Result<TableCounts, DbErr> {
        let mut written = TableCounts::default();

        tracing::info!(source = %source_name, "Syncing {} resellers", snapshot.resellers.len());
        written.resellers = self
            .replace_counted(source_name, rows::resellers(source_name, &snapshot.resellers))
            .await?;

        tracing::info!(source = %source_name, "Syncing {} visps", snapshot.visps.len());
        written.visps = self
            .replace_counted(source_name, rows::visps(source_name, &snapshot.visps))
            .await?;

        tracing::info!(source = %source_name, "Syncing {} centers", snapshot.centers.len());
        written.centers = self
            .replace_counted(source_name, rows::centers(source_name, &snapshot.centers))
            .await?;

        tracing::info!(source = %source_name, "Syncing {} supporters", snapshot.supporters.len());
        written.supporters = self
            .replace_counted(source_name, rows::supporters(source_name, &snapshot.supporters))
            .await?;

        tracing::info!(source = %source_name, "Syncing {} statuses", snapshot.statuses.len());
        written.statuses = self
            .replace_counted(source_name, rows::statuses(source_name, &snapshot.statuses))
            .await?;

        tracing::info!(source = %source_name, "Syncing {} services", snapshot.services.len());
        written.services = self
            .replace_counted(source_name, rows::services(source_name, &snapshot.services))
            .await?;

        tracing::info!(
            source = %source_name,
            "Syncing {} reseller permits",
            snapshot.reseller_permits.len()
        );
        written.reseller_permits = self
            .replace_counted(
                source_name,
                rows::reseller_permits(source_name, &snapshot.reseller_permits),
            )
            .await?;

        tracing::info!(
            source = %source_name,
            "Syncing {} service-reseller access",
            snapshot.service_reseller.len()
        );
        written.service_reseller = self
            .replace_counted(
                source_name,
                rows::service_reseller_access(source_name, &snapshot.service_reseller),
            )
            .await?;

        tracing::info!(
            source = %source_name,
            "Syncing {} status-reseller access",
            snapshot.status_reseller.len()
        );
        written.status_reseller = self
            .replace_counted(
                source_name,
                rows::status_reseller_access(source_name, &snapshot.status_reseller),
            )
            .await?;

        tracing::info!(
            source = %source_name,
            "Syncing {} service-visp access",
            snapshot.service_visp.len()
        );
        written.service_visp = self
            .replace_counted(
                source_name,
                rows::service_visp_access(source_name, &snapshot.service_visp),
            )
            .await?;

        tracing::info!(
            source = %source_name,
            "Syncing {} status-visp access",
            snapshot.status_visp.len()
        );
        written.status_visp = self
            .replace_counted(
                source_name,
                rows::status_visp_access(source_name, &snapshot.status_visp),
            )
            .await?;

        tracing::info!(
            source = %source_name,
            "Syncing {} center-visp access",
            snapshot.center_visp.len()
        );
        written.center_visp = self
            .replace_counted(
                source_name,
                rows::center_visp_access(source_name, &snapshot.center_visp),
            )
            .await?;

        Ok(written)
    }

    async fn replace_counted<A>(&self, source_name: &str, models: Vec<A>) -> Result<usize, DbErr>
    where
        A: ActiveModelTrait + Send,
        A::Entity: SourceScopedEntity,
    {
        let count = models.len();
        self.replace_for_source(source_name, models).await?;

        Ok(count)
    }

    /// All rows of `E` tagged with `source_name`.
    pub async fn find_by_source<E: SourceScopedEntity>(
        &self,
        source_name: &str,
    ) -> Result<Vec<E::Model>, DbErr> {
        E::find()
            .filter(E::source_name_column().eq(source_name))
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests;
