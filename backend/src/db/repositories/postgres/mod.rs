//! Postgres repository built on Diesel and an r2d2 connection pool.
//!
//! Each operation checks out one connection on the blocking thread pool and
//! hands it back when the operation ends, whatever the outcome. The schema is
//! created by embedded migrations when the repository is constructed. Store
//! failures are reported, never retried.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::task;

use crate::db::repository::{ExampleModelRepository, RepositoryError, RepositoryResult};
use crate::models::{ExampleModel, ExampleModelId, NewExampleModel};

mod config;
mod models;
mod schema;

pub use config::PostgresConfig;

use models::{ExampleModelChanges, ExampleModelRow};
use schema::example_models;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Snapshot of pool occupancy and operation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub max_connections: u32,
    pub open_connections: u32,
    pub idle_connections: u32,
    /// Operations attempted, including those that never got a connection.
    pub queries: u64,
    /// Attempts that ended in an error other than not-found.
    pub failed_queries: u64,
}

#[derive(Debug, Default)]
struct QueryCounters {
    attempted: AtomicU64,
    failed: AtomicU64,
}

#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    counters: Arc<QueryCounters>,
}

impl PostgresRepository {
    /// Connect, apply pending migrations and return the repository.
    ///
    /// Blocks until the pool holds `min_connections` connections or
    /// `connect_timeout` elapses, so async callers should run it through
    /// `spawn_blocking`.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        config.check()?;

        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder()
            .max_size(config.max_connections)
            .min_idle(Some(config.min_connections))
            .connection_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| RepositoryError::from(e).in_operation("connect"))?;

        let mut conn = pool
            .get()
            .map_err(|e| RepositoryError::from(e).in_operation("migrate"))?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| {
                RepositoryError::internal(format!("migration failed: {}", e))
                    .in_operation("migrate")
            })?
            .len();
        drop(conn);

        log::info!(
            "connected to postgres (max_connections={}, migrations applied={})",
            config.max_connections,
            applied
        );
        Ok(Self::with_pool(pool))
    }

    fn with_pool(pool: PgPool) -> Self {
        Self {
            pool,
            counters: Arc::default(),
        }
    }

    /// Run `f` with one pooled connection on the blocking thread pool.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        let counters = Arc::clone(&self.counters);

        task::spawn_blocking(move || {
            counters.attempted.fetch_add(1, Ordering::Relaxed);
            let result = pool
                .get()
                .map_err(RepositoryError::from)
                .and_then(|mut conn| f(&mut conn));
            if matches!(&result, Err(e) if !e.is_not_found()) {
                counters.failed.fetch_add(1, Ordering::Relaxed);
            }
            result.map_err(|e| e.in_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal(format!("blocking task failed: {}", e)).in_operation(operation)
        })?
    }

    pub fn pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            max_connections: self.pool.max_size(),
            open_connections: state.connections,
            idle_connections: state.idle_connections,
            queries: self.counters.attempted.load(Ordering::Relaxed),
            failed_queries: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Delete every row. Identifiers keep increasing afterwards.
    pub async fn clear(&self) -> RepositoryResult<usize> {
        self.with_conn("clear", |conn| {
            diesel::delete(example_models::table)
                .execute(conn)
                .map_err(RepositoryError::from)
        })
        .await
    }
}

#[async_trait]
impl ExampleModelRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn create_model(&self, model: &NewExampleModel) -> RepositoryResult<ExampleModel> {
        let model = model.clone();
        self.with_conn("create_model", move |conn| {
            diesel::insert_into(example_models::table)
                .values(ExampleModelChanges::from(&model))
                .returning(ExampleModelRow::as_returning())
                .get_result::<ExampleModelRow>(conn)
                .map(ExampleModel::from)
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn get_model(&self, id: ExampleModelId) -> RepositoryResult<ExampleModel> {
        self.with_conn("get_model", move |conn| {
            example_models::table
                .find(id.value())
                .select(ExampleModelRow::as_select())
                .first::<ExampleModelRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .map(ExampleModel::from)
                .ok_or_else(|| RepositoryError::not_found(id))
        })
        .await
    }

    async fn list_models(&self) -> RepositoryResult<Vec<ExampleModel>> {
        self.with_conn("list_models", |conn| {
            example_models::table
                .select(ExampleModelRow::as_select())
                .order(example_models::id.asc())
                .load::<ExampleModelRow>(conn)
                .map(|rows| rows.into_iter().map(ExampleModel::from).collect())
                .map_err(RepositoryError::from)
        })
        .await
    }

    async fn update_model(
        &self,
        id: ExampleModelId,
        model: &NewExampleModel,
    ) -> RepositoryResult<ExampleModel> {
        let model = model.clone();
        self.with_conn("update_model", move |conn| {
            diesel::update(example_models::table.find(id.value()))
                .set(ExampleModelChanges::from(&model))
                .returning(ExampleModelRow::as_returning())
                .get_result::<ExampleModelRow>(conn)
                .optional()
                .map_err(RepositoryError::from)?
                .map(ExampleModel::from)
                .ok_or_else(|| RepositoryError::not_found(id))
        })
        .await
    }

    async fn delete_model(&self, id: ExampleModelId) -> RepositoryResult<()> {
        self.with_conn("delete_model", move |conn| {
            let deleted = diesel::delete(example_models::table.find(id.value()))
                .execute(conn)
                .map_err(RepositoryError::from)?;
            if deleted == 0 {
                return Err(RepositoryError::not_found(id));
            }
            Ok(())
        })
        .await
    }
}
