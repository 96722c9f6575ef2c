//! Repository port shared by every storefront entity.

use crate::storefront::domain::{
    Address, City, Country, Customer, Entity, EntityKind, Payment, Reference, Staff,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for storefront repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListOrder {
    /// Ascending primary key.
    #[default]
    ById,
    /// Most recently updated (or paid) first, ties broken by descending key.
    RecentlyUpdated,
}

/// Pagination and ordering of a listing. Pages are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    page: u32,
    page_size: u32,
    order: ListOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ListQuery {
    /// Rows per page when the caller does not say otherwise.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// First page of [`Self::DEFAULT_PAGE_SIZE`] rows ordered by key.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 0,
            page_size: Self::DEFAULT_PAGE_SIZE,
            order: ListOrder::ById,
        }
    }

    /// Selects the zero-based page.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size. A size of zero is raised to one.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = if page_size == 0 { 1 } else { page_size };
        self
    }

    /// Sets the ordering.
    #[must_use]
    pub const fn ordered_by(mut self, order: ListOrder) -> Self {
        self.order = order;
        self
    }

    /// Returns the zero-based page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the maximum number of rows.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of rows skipped before the page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page as u64 * self.page_size as u64
    }

    /// Returns the ordering.
    #[must_use]
    pub const fn order(&self) -> ListOrder {
        self.order
    }
}

/// Persistence contract for one storefront entity.
///
/// Implementations enforce the foreign-key invariants: a row may only point
/// at existing rows, and a row may not be deleted while others point at it.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Finds a row by primary key.
    ///
    /// Returns `None` when the row does not exist.
    async fn find(&self, id: E::Id) -> RepositoryResult<Option<E>>;

    /// Returns one page of rows.
    async fn list(&self, query: ListQuery) -> RepositoryResult<Vec<E>>;

    /// Returns the total number of rows.
    async fn count(&self) -> RepositoryResult<u64>;

    /// Inserts a validated draft, stamping it with `now`, and returns the
    /// stored row with its assigned key.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::MissingReference`] when a foreign key
    /// points at a row that does not exist.
    async fn insert(&self, draft: E::Draft, now: DateTime<Utc>) -> RepositoryResult<E>;

    /// Persists the mutable fields of an existing row.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the row does not exist or
    /// [`RepositoryError::MissingReference`] when a foreign key dangles.
    async fn update(&self, entity: &E) -> RepositoryResult<()>;

    /// Deletes a row.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the row does not exist or
    /// [`RepositoryError::StillReferenced`] while other rows point at it.
    async fn delete(&self, id: E::Id) -> RepositoryResult<()>;
}

/// A store holding all six storefront tables.
pub trait StorefrontStore:
    EntityRepository<Country>
    + EntityRepository<City>
    + EntityRepository<Address>
    + EntityRepository<Customer>
    + EntityRepository<Staff>
    + EntityRepository<Payment>
    + 'static
{
}

impl<T> StorefrontStore for T where
    T: EntityRepository<Country>
        + EntityRepository<City>
        + EntityRepository<Address>
        + EntityRepository<Customer>
        + EntityRepository<Staff>
        + EntityRepository<Payment>
        + 'static
{
}

/// Errors returned by storefront repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The row was not found.
    #[error("row not found: {0}")]
    NotFound(Reference),

    /// A foreign key points at a row that does not exist.
    #[error("referenced row does not exist: {0}")]
    MissingReference(Reference),

    /// The row cannot be deleted while rows of another entity point at it.
    #[error("{target} is still referenced by {referrer} rows")]
    StillReferenced {
        /// Row whose deletion was refused.
        target: Reference,
        /// Entity holding the foreign key.
        referrer: EntityKind,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
