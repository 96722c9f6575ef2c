//! Port contracts for storefront persistence.

mod repository;

pub use repository::{
    EntityRepository, ListOrder, ListQuery, RepositoryError, RepositoryResult, StorefrontStore,
};
