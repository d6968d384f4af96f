use anyhow::{Context, Result};
use zipcode_weather::{AppConfig, build_state, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging);

    if config.weather.api_key.is_empty() {
        tracing::warn!("Weather API key is empty, temperature lookups will be rejected upstream");
    }
    tracing::debug!(?config, "Configuration loaded");

    let state = build_state(&config)?;

    web::run(config.server.port, state)
        .await
        .map_err(|e| anyhow::anyhow!("{}: {e}", e.user_message()))
}
