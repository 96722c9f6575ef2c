//! `storefront-admin` binary.

use storefront_admin::{app, config::AppConfig, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init_telemetry(config.environment, config.log_level)?;
    tracing::info!(environment = ?config.environment, "starting storefront admin");

    if let Err(err) = app::run(&config).await {
        tracing::error!(error = %err, "storefront admin stopped");
        return Err(err.into());
    }
    Ok(())
}
