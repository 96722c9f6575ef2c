//! Shared test helpers for `PostgreSQL` integration tests.

use super::cluster::{BoxError, TemporaryDatabase, shared_cluster};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use storefront_admin::storefront::{
    adapters::postgres::{PostgresStorefront, connect_pool},
    services::ModelRegistry,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// SQL that creates the six storefront tables.
pub const CREATE_STOREFRONT_SQL: &str =
    include_str!("../../migrations/2026-10-17-000000_create_storefront_tables/up.sql");

/// Template database name for pre-migrated schema.
pub const TEMPLATE_DB: &str = "storefront_admin_test_template";

/// Registry type used across the `PostgreSQL` tests.
pub type PgRegistry = ModelRegistry<PostgresStorefront, DefaultClock>;

/// Registry over a fresh database cloned from the template.
///
/// Fields drop in order, so the pool closes before the database is dropped.
pub struct PgContext {
    /// Registry under test.
    pub registry: PgRegistry,
    /// Runtime that drives the async registry calls.
    pub rt: Runtime,
    _database: TemporaryDatabase,
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url)?;
    conn.batch_execute(CREATE_STOREFRONT_SQL)?;
    Ok(())
}

fn prepare() -> Result<Option<PgContext>, BoxError> {
    let Some(cluster) = shared_cluster() else {
        return Ok(None);
    };
    cluster.ensure_template_exists(TEMPLATE_DB, apply_migrations)?;
    let database =
        cluster.temporary_database_from_template(&format!("test_{}", Uuid::new_v4()), TEMPLATE_DB)?;
    let pool = connect_pool(&database.url(), 2)?;
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(Some(PgContext {
        registry: ModelRegistry::new(
            Arc::new(PostgresStorefront::new(pool)),
            Arc::new(DefaultClock),
        ),
        rt,
        _database: database,
    }))
}

/// Provides a registry over a migrated database, or `None` when no cluster
/// is available on this runner.
#[fixture]
pub fn pg_context() -> Option<PgContext> {
    prepare().expect("prepare PostgreSQL test database")
}
