//! Name-addressed, JSON-valued view over a set of entities.
//!
//! The admin agent never sees the typed storefront API. It addresses
//! collections by name and exchanges rows as JSON objects through the
//! [`Datasource`] trait; [`StorefrontDatasource`] implements it over the
//! [`ModelRegistry`](crate::storefront::services::ModelRegistry).

mod error;
mod storefront;

#[cfg(test)]
mod tests;

pub use error::{DatasourceError, DatasourceResult};
pub use storefront::StorefrontDatasource;

use crate::storefront::{domain::ModelDefinition, ports::ListQuery};
use async_trait::async_trait;
use serde_json::Value;

/// A set of collections the admin agent can query and mutate.
#[async_trait]
pub trait Datasource: Send + Sync {
    /// Describes the collections this datasource serves.
    fn collections(&self) -> Vec<ModelDefinition>;

    /// Returns one page of rows of `collection`.
    async fn list(&self, collection: &str, query: ListQuery) -> DatasourceResult<Vec<Value>>;

    /// Counts the rows of `collection`.
    async fn count(&self, collection: &str) -> DatasourceResult<u64>;

    /// Returns row `id` of `collection`.
    async fn get(&self, collection: &str, id: i32) -> DatasourceResult<Value>;

    /// Creates a row from a JSON draft and returns it.
    async fn create(&self, collection: &str, body: Value) -> DatasourceResult<Value>;

    /// Replaces the fields of row `id` and returns the updated row.
    async fn update(&self, collection: &str, id: i32, body: Value) -> DatasourceResult<Value>;

    /// Deletes row `id` of `collection`.
    async fn delete(&self, collection: &str, id: i32) -> DatasourceResult<()>;

    /// Follows the `relation` association of row `id` and returns the
    /// related row.
    async fn related(&self, collection: &str, id: i32, relation: &str)
    -> DatasourceResult<Value>;
}
