//! Bike-Sharing API Server
//!
//! Run with: cargo run --bin bikeshare-api
//!
//! # Configuration
//!
//! Read from `BIKESHARE_CONFIG` when set, otherwise from the user config
//! dir or `./bikeshare.toml`. Environment variables override the file:
//! - `BIKESHARE_DAILY_PATH`: Daily records CSV (default: day_df.csv)
//! - `BIKESHARE_HOURLY_PATH`: Hourly records CSV (default: hour_df.csv)
//! - `BIKESHARE_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `BIKESHARE_API_PORT`: Port to listen on (default: 8501)
//! - `BIKESHARE_LOG_LEVEL`, `BIKESHARE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, wins over the level

use anyhow::Context;
use bikeshare::api::{serve, AppState};
use bikeshare::config::Config;
use bikeshare::dataset::Dataset;
use bikeshare::logging;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("BIKESHARE_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            Config::load_with_env(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        Err(_) => Config::load_default(),
    };

    let _guard = logging::init(&config.logging).context("Failed to initialize logging")?;

    tracing::info!("Starting bike-sharing API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Daily records: {:?}", config.data.daily_path);
    tracing::info!("Hourly records: {:?}", config.data.hourly_path);

    let dataset = Dataset::load(&config.data.daily_path, &config.data.hourly_path)
        .context("Failed to load dataset")?;

    tracing::info!(
        daily = dataset.daily().len(),
        hourly = dataset.hourly().len(),
        "Dataset loaded"
    );

    let state = AppState::new(Arc::new(dataset), config.api.clone());

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Bike-sharing API server stopped");
    Ok(())
}
