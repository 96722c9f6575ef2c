//! `tracing` subscriber set-up.

use crate::agent::AgentLogLevel;
use crate::config::RuntimeEnvironment;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Error returned when a global subscriber is already installed.
#[derive(Debug, Error)]
#[error("failed to install the tracing subscriber: {0}")]
pub struct TelemetryError(#[from] TryInitError);

/// Builds the default filter for `level`; `RUST_LOG` takes precedence.
#[must_use]
pub fn default_filter(level: AgentLogLevel) -> String {
    let directive = level.as_directive();
    format!(
        "{directive},storefront_admin={directive},forest_agent={directive},tower=warn,hyper=warn"
    )
}

/// Installs the global subscriber: JSON lines in production, compact
/// human-readable lines otherwise.
///
/// # Errors
///
/// Returns [`TelemetryError`] when a global subscriber already exists.
pub fn init_telemetry(
    environment: RuntimeEnvironment,
    level: AgentLogLevel,
) -> Result<(), TelemetryError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    let registry = tracing_subscriber::registry().with(filter);

    if environment.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .try_init()?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(true))
            .try_init()?;
    }
    Ok(())
}
