//! Agent construction options and log routing.

use crate::config::Secret;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default base URL of the remote management service.
pub const DEFAULT_SERVER_URL: &str = "https://api.forestadmin.com";

/// Default delay between two heartbeats.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(60);

/// Severity of an agent log line. Ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum AgentLogLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal lifecycle events.
    #[default]
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
}

impl AgentLogLevel {
    /// Returns the canonical name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Info => "Info",
            Self::Warn => "Warn",
            Self::Error => "Error",
        }
    }

    /// Returns the matching `tracing` directive.
    #[must_use]
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AgentLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned while parsing a log level.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown log level: {0} (expected Debug, Info, Warn or Error)")]
pub struct ParseAgentLogLevelError(pub String);

impl TryFrom<&str> for AgentLogLevel {
    type Error = ParseAgentLogLevelError;

    fn try_from(value: &str) -> Result<Self, ParseAgentLogLevelError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseAgentLogLevelError(value.to_owned())),
        }
    }
}

/// Receives agent log lines that pass the level filter.
pub trait AgentLogger: Send + Sync {
    /// Handles one log line.
    fn log(&self, level: AgentLogLevel, message: &str);
}

impl<F> AgentLogger for F
where
    F: Fn(AgentLogLevel, &str) + Send + Sync,
{
    fn log(&self, level: AgentLogLevel, message: &str) {
        self(level, message);
    }
}

/// Forwards agent log lines to `tracing` under the `forest_agent` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAgentLogger;

impl AgentLogger for TracingAgentLogger {
    fn log(&self, level: AgentLogLevel, message: &str) {
        match level {
            AgentLogLevel::Debug => tracing::debug!(target: "forest_agent", "{message}"),
            AgentLogLevel::Info => tracing::info!(target: "forest_agent", "{message}"),
            AgentLogLevel::Warn => tracing::warn!(target: "forest_agent", "{message}"),
            AgentLogLevel::Error => tracing::error!(target: "forest_agent", "{message}"),
        }
    }
}

/// A logger together with its minimum level.
#[derive(Clone)]
pub(crate) struct AgentLog {
    threshold: AgentLogLevel,
    logger: Arc<dyn AgentLogger>,
}

impl AgentLog {
    pub(crate) const fn new(threshold: AgentLogLevel, logger: Arc<dyn AgentLogger>) -> Self {
        Self { threshold, logger }
    }

    pub(crate) fn emit(&self, level: AgentLogLevel, message: &str) {
        if level >= self.threshold {
            self.logger.log(level, message);
        }
    }
}

/// Options for constructing an [`AdminAgent`](super::AdminAgent).
#[derive(Clone)]
pub struct AgentOptions {
    /// Secret used to verify admin user tokens.
    pub auth_secret: Secret,
    /// Secret identifying this environment to the remote service.
    pub env_secret: Secret,
    /// Whether the agent serves a production environment.
    pub is_production: bool,
    /// Minimum level of forwarded log lines.
    pub logger_level: AgentLogLevel,
    /// Destination of agent log lines.
    pub logger: Arc<dyn AgentLogger>,
    /// Base URL of the remote management service.
    pub server_url: String,
    /// Delay between two heartbeats.
    pub heartbeat_interval: Duration,
}

impl AgentOptions {
    /// Creates development options with the default logger, level, server
    /// and heartbeat interval.
    #[must_use]
    pub fn new(auth_secret: Secret, env_secret: Secret) -> Self {
        Self {
            auth_secret,
            env_secret,
            is_production: false,
            logger_level: AgentLogLevel::default(),
            logger: Arc::new(TracingAgentLogger),
            server_url: DEFAULT_SERVER_URL.to_owned(),
            heartbeat_interval: DEFAULT_HEARTBEAT_INTERVAL,
        }
    }

    /// Marks the environment as production.
    #[must_use]
    pub const fn with_production(mut self, is_production: bool) -> Self {
        self.is_production = is_production;
        self
    }

    /// Sets the minimum log level.
    #[must_use]
    pub const fn with_logger_level(mut self, level: AgentLogLevel) -> Self {
        self.logger_level = level;
        self
    }

    /// Replaces the log destination.
    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn AgentLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Sets the remote service base URL.
    #[must_use]
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    /// Sets the heartbeat interval.
    #[must_use]
    pub const fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }
}

impl fmt::Debug for AgentOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentOptions")
            .field("auth_secret", &self.auth_secret)
            .field("env_secret", &self.env_secret)
            .field("is_production", &self.is_production)
            .field("logger_level", &self.logger_level)
            .field("server_url", &self.server_url)
            .field("heartbeat_interval", &self.heartbeat_interval)
            .finish_non_exhaustive()
    }
}
