//! Errors raised while building and starting the admin agent.

use super::ForestServerError;
use thiserror::Error;

/// Errors returned by [`AdminAgent`](super::AdminAgent) construction and
/// start-up.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The auth secret is empty.
    #[error("the auth secret must not be empty")]
    MissingAuthSecret,

    /// The environment secret is not a 64-digit hexadecimal string.
    #[error("the environment secret must be 64 hexadecimal characters")]
    InvalidEnvSecret,

    /// Two datasources declare a collection with the same name.
    #[error("collection {0} is served by more than one datasource")]
    DuplicateCollection(String),

    /// The remote service could not be reached or rejected the schema.
    #[error("schema synchronisation failed: {0}")]
    SchemaSync(#[source] ForestServerError),
}
