//! # Presence Service
//!
//! Heartbeat-based online presence tracking.
//!
//! This is the application entry point that initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Presence tracker and its sweeper
//! - HTTP server

use anyhow::Result;
use tracing::info;

use presence_service::config::Settings;
use presence_service::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Settings decide the log format, so they load before tracing starts
    let settings = Settings::load()?;
    presence_service::telemetry::init_tracing(settings.log_format);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        heartbeat_ttl_secs = settings.presence.heartbeat_ttl_secs,
        sweep_interval_secs = settings.presence.sweep_interval_secs,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
