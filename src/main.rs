use anyhow::{Context, Result};
use tempcep::{ServiceConfig, telemetry, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::load().context("Failed to load configuration")?;
    telemetry::init(&config.logging)?;

    tracing::info!("TempCep {} starting", tempcep::VERSION);
    web::run(&config).await
}
