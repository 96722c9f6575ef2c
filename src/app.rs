//! Process wiring: store, registry, agent and HTTP server.

use crate::agent::{AdminAgent, AgentError, AgentOptions};
use crate::config::AppConfig;
use crate::datasource::StorefrontDatasource;
use crate::server::{
    self,
    pages::{CustomerDefaults, PageError, Pages},
    shutdown::{self, Interruptible},
};
use crate::storefront::{
    adapters::{
        memory::InMemoryStorefront,
        postgres::{PostgresStorefront, connect_pool},
    },
    domain::AddressId,
    ports::StorefrontStore,
    services::ModelRegistry,
};
use diesel::r2d2::PoolError;
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

const POOL_SIZE: u32 = 8;

/// Errors that stop the process.
#[derive(Debug, Error)]
pub enum AppError {
    /// The database could not be reached.
    #[error("failed to connect to PostgreSQL: {0}")]
    Database(#[from] PoolError),

    /// The admin agent could not be built or started.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The page templates failed to load.
    #[error(transparent)]
    Pages(#[from] PageError),

    /// The listening socket could not be bound.
    #[error("failed to bind {address}: {source}")]
    Bind {
        /// Address that was requested.
        address: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The server or the signal listener failed.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Runs the application until interrupted.
///
/// # Errors
///
/// Returns [`AppError`] when any start-up step fails.
pub async fn run(config: &AppConfig) -> Result<(), AppError> {
    let Some(url) = &config.database_url else {
        tracing::warn!("POSTGRESQL_URL is not set; rows are kept in memory");
        return serve(config, InMemoryStorefront::new()).await;
    };
    let pool = connect_pool(url.expose(), POOL_SIZE)?;
    tracing::info!(database = %url.fingerprint(), "connected to PostgreSQL");
    serve(config, PostgresStorefront::new(pool)).await
}

fn agent_options(config: &AppConfig) -> AgentOptions {
    AgentOptions::new(config.auth_secret.clone(), config.env_secret.clone())
        .with_production(config.environment.is_production())
        .with_logger_level(config.log_level)
        .with_server_url(config.server_url.clone())
}

async fn serve<S: StorefrontStore>(config: &AppConfig, store: S) -> Result<(), AppError> {
    let registry = ModelRegistry::new(Arc::new(store), Arc::new(DefaultClock));
    let agent = AdminAgent::new(agent_options(config))?
        .add_datasource(Arc::new(StorefrontDatasource::new(registry.clone())))?;
    let pages = Pages::new(
        registry,
        CustomerDefaults {
            store_id: config.default_store_id,
            address_id: AddressId::new(config.default_address_id),
        },
    )?;
    let router = server::router(&agent, pages);

    let work = async {
        let listener = TcpListener::bind(config.address.bind_target())
            .await
            .map_err(|source| AppError::Bind {
                address: config.address.bind_target(),
                source,
            })?;
        let _heartbeat = agent.start_with_http().await?;
        tracing::info!("Listening on {}", config.address);
        axum::serve(listener, router).await.map_err(AppError::Serve)
    };

    match shutdown::until_interrupted(work, shutdown::interrupted()).await {
        Interruptible::Completed(outcome) => outcome,
        Interruptible::Interrupted(signal) => {
            signal.map_err(AppError::Serve)?;
            shutdown::handle_interrupt(&config.address, |code| std::process::exit(code));
            Ok(())
        }
    }
}
