//! Wave API server
//!
//! Fetches GFS Wave direction on demand, crops it to the configured box and
//! serves stored records by day.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use wave_api::config::ServiceConfig;
use wave_api::server;
use wave_api::state::AppState;

/// Wave API Server
#[derive(Parser, Debug)]
#[command(name = "wave-api")]
#[command(about = "GFS Wave fetch, crop and query service")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    // Initialize Prometheus metrics exporter
    let prometheus = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting wave API server");

    let config = ServiceConfig::from_env()?;
    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", args.listen))?;

    let state = Arc::new(AppState::new(&config, Some(prometheus)).await?);
    let store = state.store().clone();

    server::serve(state, addr, shutdown_signal()).await?;

    info!("Closing record store");
    store.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
