//! Port to the remote management service.

use super::Apimap;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`ForestServer`] implementations.
#[derive(Debug, Clone, Error)]
pub enum ForestServerError {
    /// The request never produced a response.
    #[error("remote service unreachable: {0}")]
    Unreachable(Arc<dyn std::error::Error + Send + Sync>),

    /// The remote service answered with a non-success status.
    #[error("remote service rejected the request with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
}

impl ForestServerError {
    /// Wraps a transport error.
    pub fn unreachable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unreachable(Arc::new(err))
    }
}

/// The remote management service the agent synchronises with.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForestServer: Send + Sync {
    /// Publishes the schema of the mounted collections.
    ///
    /// # Errors
    ///
    /// Returns [`ForestServerError`] when the service is unreachable or
    /// rejects the schema.
    async fn send_apimap(&self, apimap: &Apimap) -> Result<(), ForestServerError>;

    /// Signals that the agent is still alive.
    ///
    /// # Errors
    ///
    /// Returns [`ForestServerError`] when the service is unreachable or
    /// rejects the heartbeat.
    async fn heartbeat(&self) -> Result<(), ForestServerError>;
}
