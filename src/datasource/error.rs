//! Errors returned by datasources.

use crate::storefront::services::RegistryError;
use std::sync::Arc;
use thiserror::Error;

/// Result type for datasource operations.
pub type DatasourceResult<T> = Result<T, DatasourceError>;

/// Errors returned by [`Datasource`](super::Datasource) implementations.
#[derive(Debug, Error)]
pub enum DatasourceError {
    /// No collection has this name.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// The collection declares no association with this name.
    #[error("collection {collection} has no relation named {relation}")]
    UnknownRelation {
        /// Collection queried.
        collection: String,
        /// Relation requested.
        relation: String,
    },

    /// The request body does not describe a valid draft.
    #[error("invalid payload: {0}")]
    InvalidPayload(Arc<serde_json::Error>),

    /// A row could not be rendered as JSON.
    #[error("failed to serialise row: {0}")]
    Serialization(Arc<serde_json::Error>),

    /// The underlying registry rejected the operation.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl DatasourceError {
    pub(crate) fn invalid_payload(err: serde_json::Error) -> Self {
        Self::InvalidPayload(Arc::new(err))
    }

    pub(crate) fn serialization(err: serde_json::Error) -> Self {
        Self::Serialization(Arc::new(err))
    }
}
