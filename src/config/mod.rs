//! Process configuration.
//!
//! Every setting is read from a command-line flag or, failing that, from
//! the environment (a `.env` file is loaded first when present). [`Cli`]
//! holds the raw values and [`AppConfig::from_cli`] validates them.

mod secret;


pub use secret::Secret;

use crate::agent::{AgentLogLevel, DEFAULT_SERVER_URL};
use clap::Parser;
use std::fmt;
use thiserror::Error;

/// Raw command-line and environment settings.
#[derive(Debug, Clone, Parser)]
#[command(name = "storefront-admin", version, about = "Storefront admin agent and HTTP shell")]
pub struct Cli {
    /// Secret used to verify admin user tokens.
    #[arg(long, env = "FOREST_AUTH_SECRET", hide_env_values = true)]
    pub auth_secret: Option<String>,

    /// 64-hex-digit secret identifying this environment.
    #[arg(long, env = "FOREST_ENV_SECRET", hide_env_values = true)]
    pub env_secret: Option<String>,

    /// Runtime environment; `production` enables production mode.
    #[arg(long = "node-env", env = "NODE_ENV", default_value = "development")]
    pub node_env: String,

    /// `PostgreSQL` connection URL. Without it rows live in memory.
    #[arg(long, env = "POSTGRESQL_URL", hide_env_values = true)]
    pub postgresql_url: Option<String>,

    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to bind.
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: String,

    /// Agent log level (Debug, Info, Warn or Error).
    #[arg(long, env = "FOREST_LOG_LEVEL", default_value = "Info")]
    pub log_level: String,

    /// Base URL of the remote management service.
    #[arg(long, env = "FOREST_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Store assigned to customers created from the storefront pages.
    #[arg(long, env = "STOREFRONT_DEFAULT_STORE_ID", default_value_t = 1)]
    pub default_store_id: i32,

    /// Address assigned to customers created from the storefront pages.
    #[arg(long, env = "STOREFRONT_DEFAULT_ADDRESS_ID", default_value_t = 1)]
    pub default_address_id: i32,
}

/// Errors raised while validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or blank.
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable holds a value that cannot be used.
    #[error("{variable} is invalid: {reason}")]
    Invalid {
        /// Offending variable.
        variable: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Deployment environment, taken from `NODE_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeEnvironment {
    /// Anything other than `production`.
    #[default]
    Development,
    /// `NODE_ENV=production`.
    Production,
}

impl RuntimeEnvironment {
    /// Interprets a `NODE_ENV` value.
    #[must_use]
    pub fn from_node_env(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }

    /// Returns whether this is a production deployment.
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Host and port the HTTP server binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddress {
    /// Interface name or address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl ServerAddress {
    /// Returns the `host:port` form accepted by `TcpListener::bind`.
    #[must_use]
    pub fn bind_target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "http://{}:{}", self.host, self.port)
    }
}

/// Validated process configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Secret used to verify admin user tokens.
    pub auth_secret: Secret,
    /// Secret identifying this environment.
    pub env_secret: Secret,
    /// Deployment environment.
    pub environment: RuntimeEnvironment,
    /// Database URL, when rows are persisted in `PostgreSQL`.
    pub database_url: Option<Secret>,
    /// Bind address.
    pub address: ServerAddress,
    /// Agent log level.
    pub log_level: AgentLogLevel,
    /// Remote management service base URL.
    pub server_url: String,
    /// Store assigned to customers created from the pages.
    pub default_store_id: i32,
    /// Address assigned to customers created from the pages.
    pub default_address_id: i32,
}

fn required_secret(value: Option<String>, variable: &'static str) -> Result<Secret, ConfigError> {
    value
        .map(Secret::new)
        .filter(|secret| !secret.is_blank())
        .ok_or(ConfigError::Missing(variable))
}

fn invalid(variable: &'static str, reason: impl fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        variable,
        reason: reason.to_string(),
    }
}

impl AppConfig {
    /// Loads `.env` when present, then parses flags and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails. Malformed flags are
    /// reported by `clap`, which exits the process.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is not an error.
        dotenvy::dotenv().ok();
        Self::from_cli(Cli::parse())
    }

    /// Validates raw settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when a secret is absent and
    /// [`ConfigError::Invalid`] when the port, log level or server URL
    /// cannot be used.
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let auth_secret = required_secret(cli.auth_secret, "FOREST_AUTH_SECRET")?;
        let env_secret = required_secret(cli.env_secret, "FOREST_ENV_SECRET")?;
        let port = cli
            .port
            .trim()
            .parse::<u16>()
            .map_err(|err| invalid("PORT", err))?;
        let log_level = AgentLogLevel::try_from(cli.log_level.as_str())
            .map_err(|err| invalid("FOREST_LOG_LEVEL", err))?;
        let server_url = cli.server_url.trim().trim_end_matches('/').to_owned();
        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(invalid("FOREST_SERVER_URL", "expected an http or https URL"));
        }

        Ok(Self {
            auth_secret,
            env_secret,
            environment: RuntimeEnvironment::from_node_env(&cli.node_env),
            database_url: cli
                .postgresql_url
                .map(Secret::new)
                .filter(|url| !url.is_blank()),
            address: ServerAddress {
                host: cli.host.trim().to_owned(),
                port,
            },
            log_level,
            server_url,
            default_store_id: cli.default_store_id,
            default_address_id: cli.default_address_id,
        })
    }
}
