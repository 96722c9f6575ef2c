//! Admin agent bootstrap.
//!
//! The [`AdminAgent`] gathers one or more [`Datasource`]s, serves them to
//! admin users over authenticated routes under `/forest`, and keeps the
//! remote management service informed: the collection schema is published
//! once at start-up and a heartbeat follows on a fixed interval.
//!
//! Mount the agent before any other route so it has first claim on the
//! `/forest` prefix.

mod apimap;
mod auth;
mod error;
mod http_client;
mod options;
mod ports;
mod routes;


pub use apimap::{Apimap, ApimapCollection, ApimapField, ApimapMeta};
pub use auth::{AdminClaims, AuthError, TokenVerifier};
pub use error::AgentError;
pub use http_client::{HttpForestServer, SECRET_HEADER};
pub use options::{
    AgentLogLevel, AgentLogger, AgentOptions, DEFAULT_HEARTBEAT_INTERVAL, DEFAULT_SERVER_URL,
    ParseAgentLogLevelError, TracingAgentLogger,
};
pub use ports::{ForestServer, ForestServerError};
pub(crate) use routes::registry_status;

use crate::datasource::Datasource;
use crate::storefront::domain::ModelDefinition;
use axum::Router;
use options::AgentLog;
use routes::{AgentState, CollectionIndex};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

const MIN_HEARTBEAT_INTERVAL: Duration = Duration::from_millis(10);

fn is_env_secret(value: &str) -> bool {
    value.len() == 64 && value.bytes().all(|byte| byte.is_ascii_hexdigit())
}

/// The admin agent: datasources, routes and remote synchronisation.
pub struct AdminAgent {
    options: AgentOptions,
    log: AgentLog,
    verifier: Arc<TokenVerifier>,
    collections: CollectionIndex,
    models: Vec<ModelDefinition>,
}

impl AdminAgent {
    /// Validates `options` and creates an agent without datasources.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::MissingAuthSecret`] when the auth secret is
    /// blank and [`AgentError::InvalidEnvSecret`] when the environment
    /// secret is not 64 hexadecimal characters.
    pub fn new(options: AgentOptions) -> Result<Self, AgentError> {
        if options.auth_secret.is_blank() {
            return Err(AgentError::MissingAuthSecret);
        }
        if !is_env_secret(options.env_secret.expose()) {
            return Err(AgentError::InvalidEnvSecret);
        }

        let log = AgentLog::new(options.logger_level, Arc::clone(&options.logger));
        log.emit(
            AgentLogLevel::Debug,
            &format!(
                "agent configured (production: {}, env secret sha256:{})",
                options.is_production,
                options.env_secret.fingerprint()
            ),
        );
        Ok(Self {
            verifier: Arc::new(TokenVerifier::new(&options.auth_secret)),
            log,
            options,
            collections: CollectionIndex::new(),
            models: Vec::new(),
        })
    }

    /// Attaches a datasource.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::DuplicateCollection`] when the datasource
    /// serves a collection already served by an attached one.
    pub fn add_datasource(mut self, datasource: Arc<dyn Datasource>) -> Result<Self, AgentError> {
        for model in datasource.collections() {
            if self.collections.contains_key(model.table) {
                return Err(AgentError::DuplicateCollection(model.table.to_owned()));
            }
            self.collections
                .insert(model.table.to_owned(), Arc::clone(&datasource));
            self.models.push(model);
        }
        Ok(self)
    }

    /// Returns the names of the served collections, sorted.
    #[must_use]
    pub fn collection_names(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    /// Builds the schema document of the attached datasources.
    #[must_use]
    pub fn apimap(&self) -> Apimap {
        Apimap::from_models(&self.models, self.options.is_production)
    }

    /// Adds the agent routes to `router`.
    #[must_use]
    pub fn mount(&self, router: Router) -> Router {
        self.log.emit(
            AgentLogLevel::Info,
            &format!("serving {} collections under /forest", self.collections.len()),
        );
        let state = AgentState {
            collections: Arc::new(self.collections.clone()),
            verifier: Arc::clone(&self.verifier),
            log: self.log.clone(),
        };
        router.merge(routes::router(state))
    }

    /// Publishes the schema to `server` and starts the heartbeat loop.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SchemaSync`] when the schema cannot be
    /// delivered. The heartbeat is not started in that case.
    pub async fn start(&self, server: Arc<dyn ForestServer>) -> Result<AgentHandle, AgentError> {
        let apimap = self.apimap();
        self.log.emit(
            AgentLogLevel::Debug,
            &format!(
                "sending schema {} ({} collections)",
                apimap.meta.schema_file_hash,
                apimap.collections.len()
            ),
        );
        if let Err(err) = server.send_apimap(&apimap).await {
            self.log
                .emit(AgentLogLevel::Error, &format!("schema synchronisation failed: {err}"));
            return Err(AgentError::SchemaSync(err));
        }
        self.log.emit(AgentLogLevel::Info, "schema synchronised");

        let period = self.options.heartbeat_interval.max(MIN_HEARTBEAT_INTERVAL);
        let log = self.log.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match server.heartbeat().await {
                    Ok(()) => log.emit(AgentLogLevel::Debug, "heartbeat sent"),
                    Err(err) => log.emit(AgentLogLevel::Warn, &format!("heartbeat failed: {err}")),
                }
            }
        });
        Ok(AgentHandle { task })
    }

    /// Starts the agent against the configured remote service URL.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::SchemaSync`] when the HTTP client cannot be
    /// built or the schema cannot be delivered.
    pub async fn start_with_http(&self) -> Result<AgentHandle, AgentError> {
        let server = HttpForestServer::new(&self.options.server_url, self.options.env_secret.clone())
            .map_err(AgentError::SchemaSync)?;
        self.start(Arc::new(server)).await
    }
}

/// Handle on the running heartbeat loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct AgentHandle {
    task: JoinHandle<()>,
}

impl AgentHandle {
    /// Returns whether the heartbeat loop is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops the heartbeat loop.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for AgentHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
