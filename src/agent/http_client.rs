//! `reqwest` adapter for the remote management service.

use super::{Apimap, ForestServer, ForestServerError};
use crate::config::Secret;
use async_trait::async_trait;
use std::time::Duration;

/// Header carrying the environment secret on every request.
pub const SECRET_HEADER: &str = "forest-secret-key";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the remote management service.
#[derive(Debug, Clone)]
pub struct HttpForestServer {
    http: reqwest::Client,
    base_url: String,
    env_secret: Secret,
}

impl HttpForestServer {
    /// Creates a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ForestServerError::Unreachable`] when the TLS backend
    /// cannot be initialised.
    pub fn new(base_url: &str, env_secret: Secret) -> Result<Self, ForestServerError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ForestServerError::unreachable)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            env_secret,
        })
    }

    fn request(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{path}", self.base_url))
            .header(SECRET_HEADER, self.env_secret.expose())
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<(), ForestServerError> {
        let response = request
            .send()
            .await
            .map_err(ForestServerError::unreachable)?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ForestServerError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ForestServer for HttpForestServer {
    async fn send_apimap(&self, apimap: &Apimap) -> Result<(), ForestServerError> {
        Self::send(self.request("/forest/apimaps").json(apimap)).await
    }

    async fn heartbeat(&self) -> Result<(), ForestServerError> {
        Self::send(self.request("/forest/heartbeat")).await
    }
}
