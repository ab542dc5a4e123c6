//! Declarative test builder.
//!
//! Configuration methods only queue work; tables, fixtures and mock endpoints are all
//! created during the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// ```no_run
/// use sync_test_utils::TestBuilder;
///
/// # async fn example() -> Result<(), sync_test_utils::TestError> {
/// let test = TestBuilder::new()
///     .with_cache_tables()
///     .with_cached_reseller("north", 1, "ACME Corp")
///     .with_load_job_endpoint(1)
///     .build()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_cache_tables: bool,

    // Database fixtures to insert
    resellers: Vec<(String, i64, String)>, // (source_name, source_id, name)
    visps: Vec<(String, i64, String)>,
    services: Vec<(String, i64, String)>,

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,
    load_job_endpoints: Vec<usize>,
    query_endpoints: Vec<usize>,
    table_insert_endpoints: Vec<usize>,
    table_delete_endpoints: Vec<(String, usize)>, // (table_prefix, expected_requests)
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_cache_tables: false,
            resellers: Vec::new(),
            visps: Vec::new(),
            services: Vec::new(),
            mock_builders: Vec::new(),
            load_job_endpoints: Vec::new(),
            query_endpoints: Vec::new(),
            table_insert_endpoints: Vec::new(),
            table_delete_endpoints: Vec::new(),
        }
    }

    /// Create all twelve reference cache relations.
    pub fn with_cache_tables(mut self) -> Self {
        self.include_cache_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a cached reseller row. Requires the cache tables.
    pub fn with_cached_reseller(
        mut self,
        source_name: impl Into<String>,
        source_id: i64,
        name: impl Into<String>,
    ) -> Self {
        self.resellers
            .push((source_name.into(), source_id, name.into()));
        self
    }

    /// Insert a cached VISP row. Requires the cache tables.
    pub fn with_cached_visp(
        mut self,
        source_name: impl Into<String>,
        source_id: i64,
        name: impl Into<String>,
    ) -> Self {
        self.visps.push((source_name.into(), source_id, name.into()));
        self
    }

    /// Insert a cached service row. Requires the cache tables.
    pub fn with_cached_service(
        mut self,
        source_name: impl Into<String>,
        source_id: i64,
        name: impl Into<String>,
    ) -> Self {
        self.services
            .push((source_name.into(), source_id, name.into()));
        self
    }

    /// Mock load job endpoint completing immediately, called `expected_requests` times.
    pub fn with_load_job_endpoint(mut self, expected_requests: usize) -> Self {
        self.load_job_endpoints.push(expected_requests);
        self
    }

    /// Mock query endpoint completing immediately, called `expected_requests` times.
    pub fn with_query_endpoint(mut self, expected_requests: usize) -> Self {
        self.query_endpoints.push(expected_requests);
        self
    }

    /// Mock table creation endpoint, called `expected_requests` times.
    pub fn with_table_insert_endpoint(mut self, expected_requests: usize) -> Self {
        self.table_insert_endpoints.push(expected_requests);
        self
    }

    /// Mock deletion of tables named `table_prefix*`, called `expected_requests` times.
    pub fn with_table_delete_endpoint(
        mut self,
        table_prefix: impl Into<String>,
        expected_requests: usize,
    ) -> Self {
        self.table_delete_endpoints
            .push((table_prefix.into(), expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mockito server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test context.
    ///
    /// Executes all queued operations in order:
    /// 1. Creates database tables (cache tables if requested, then custom tables)
    /// 2. Inserts cache fixtures
    /// 3. Creates mock HTTP endpoints, custom endpoints first
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_cache_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::CacheReseller),
                schema.create_table_from_entity(entity::prelude::CacheVisp),
                schema.create_table_from_entity(entity::prelude::CacheCenter),
                schema.create_table_from_entity(entity::prelude::CacheSupporter),
                schema.create_table_from_entity(entity::prelude::CacheStatus),
                schema.create_table_from_entity(entity::prelude::CacheService),
                schema.create_table_from_entity(entity::prelude::CacheResellerPermit),
                schema.create_table_from_entity(entity::prelude::CacheServiceResellerAccess),
                schema.create_table_from_entity(entity::prelude::CacheStatusResellerAccess),
                schema.create_table_from_entity(entity::prelude::CacheServiceVispAccess),
                schema.create_table_from_entity(entity::prelude::CacheStatusVispAccess),
                schema.create_table_from_entity(entity::prelude::CacheCenterVispAccess),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert cache fixtures
        for (source_name, source_id, name) in &self.resellers {
            setup
                .cache()
                .insert_reseller(source_name, *source_id, name)
                .await?;
        }

        for (source_name, source_id, name) in &self.visps {
            setup.cache().insert_visp(source_name, *source_id, name).await?;
        }

        for (source_name, source_id, name) in &self.services {
            setup
                .cache()
                .insert_service(source_name, *source_id, name)
                .await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints go first so tests can queue specific responses (an error, then
        // a success) ahead of the generic ones for the same path.
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for expected in self.load_job_endpoints {
            mocks.push(setup.bigquery().create_load_job_endpoint(expected));
        }

        for expected in self.query_endpoints {
            mocks.push(setup.bigquery().create_query_endpoint(expected));
        }

        for expected in self.table_insert_endpoints {
            mocks.push(setup.bigquery().create_table_insert_endpoint(expected));
        }

        for (prefix, expected) in self.table_delete_endpoints {
            mocks.push(
                setup
                    .bigquery()
                    .create_table_delete_endpoint(&prefix, expected),
            );
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
