//! PowerAdmin Exporter — Entry Point
//!
//! Wiring sequence:
//! 1. Parse CLI flags (config dir, listen address, telemetry path)
//! 2. Init tracing
//! 3. Load + validate the three YAML config files
//! 4. Create PowerAdminClient (ExternalMetricsSource port)
//! 5. Create StatsDatabase (MetricsDatabase port, lazy connection)
//! 6. Create the collector and serve /metrics until SIGINT

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use poweradmin_exporter::adapters::db::StatsDatabase;
use poweradmin_exporter::adapters::exposition::{build_registry, serve, AppState};
use poweradmin_exporter::adapters::poweradmin::PowerAdminClient;
use poweradmin_exporter::config::loader::load_config;
use poweradmin_exporter::usecases::PowerAdminCollector;

#[derive(Debug, Parser)]
#[command(version, about = "Prometheus exporter for PowerAdmin server monitoring")]
struct Args {
    /// Exporter configuration folder.
    #[arg(long = "config.dir", default_value = "config")]
    config_dir: String,
    /// The address to listen on for HTTP requests.
    #[arg(long = "web.listen-address", default_value = "0.0.0.0:9575")]
    listen_address: String,
    /// Path under which to expose metrics.
    #[arg(long = "web.telemetry-path", default_value = "/metrics")]
    telemetry_path: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Starting exporter");

    let config = load_config(&args.config_dir).context("Failed to load configuration")?;

    let client = PowerAdminClient::new(
        &config.interface.server_url,
        &config.interface.api_key,
        config.interface.skip_tls_verify,
    )
    .context("Failed to create PowerAdmin client")?;

    let database = StatsDatabase::new(config.interface.database.clone());

    let collector = PowerAdminCollector::new(
        Arc::new(client),
        Arc::new(database),
        &config.interface,
        config.filter,
        config.status_mapping,
    );

    let state = Arc::new(AppState {
        collector,
        registry: build_registry()?,
        telemetry_path: args.telemetry_path,
    });

    serve(&args.listen_address, state).await
}
