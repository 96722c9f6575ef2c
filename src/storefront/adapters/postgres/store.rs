//! `PostgreSQL` storefront store: pool handling and error translation.

use crate::storefront::{
    domain::{EntityKind, Reference},
    ports::{RepositoryError, RepositoryResult},
};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by the storefront store.
pub type StorefrontPgPool = Pool<ConnectionManager<PgConnection>>;

/// Opens a pool of at most `max_size` connections to `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when no connection can be established.
pub fn connect_pool(database_url: &str, max_size: u32) -> Result<StorefrontPgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().max_size(max_size.max(1)).build(manager)
}

/// `PostgreSQL`-backed store for the six storefront tables.
#[derive(Debug, Clone)]
pub struct PostgresStorefront {
    pool: StorefrontPgPool,
}

impl PostgresStorefront {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: StorefrontPgPool) -> Self {
        Self { pool }
    }

    pub(super) async fn run_blocking<F, T>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RepositoryError::persistence)?
    }
}

/// Default `PostgreSQL` name of the constraint behind `owner.foreign_key`.
fn constraint_name(owner: EntityKind, foreign_key: &str) -> String {
    format!("{}_{foreign_key}_fkey", owner.definition().table)
}

/// Maps a failed insert or update of an `owner` row.
///
/// A foreign-key violation names the constraint, which identifies which of
/// the row's `references` dangles.
pub(super) fn write_error(
    err: DieselError,
    owner: EntityKind,
    references: &[Reference],
) -> RepositoryError {
    let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info) = err else {
        return RepositoryError::persistence(err);
    };
    let dangling = info.constraint_name().and_then(|constraint| {
        owner
            .definition()
            .associations
            .iter()
            .find(|assoc| constraint_name(owner, assoc.foreign_key) == constraint)
            .and_then(|assoc| {
                references
                    .iter()
                    .find(|reference| reference.kind == assoc.target)
            })
    });
    dangling.map_or_else(
        || RepositoryError::persistence(err),
        |reference| RepositoryError::MissingReference(*reference),
    )
}

/// Maps a failed delete of `target`.
pub(super) fn delete_error(err: DieselError, target: Reference) -> RepositoryError {
    let DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, ref info) = err else {
        return RepositoryError::persistence(err);
    };
    let referrer = info.constraint_name().and_then(|constraint| {
        EntityKind::ALL.into_iter().find(|owner| {
            owner.definition().associations.iter().any(|assoc| {
                assoc.target == target.kind
                    && constraint_name(*owner, assoc.foreign_key) == constraint
            })
        })
    });
    referrer.map_or_else(
        || RepositoryError::persistence(err),
        |kind| RepositoryError::StillReferenced {
            target,
            referrer: kind,
        },
    )
}
