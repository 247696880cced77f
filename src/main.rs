//! Grant metrics server
//!
//! Serves progress, compliance, report and dashboard evaluation over HTTP.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grant_metrics::{
    api::{AppState, create_router},
    config::ConfigLoader,
};

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "grant-metrics", version, about)]
struct Args {
    /// Path to the engine configuration file.
    #[arg(long, env = "GRANT_ENGINE_CONFIG", default_value = "./config/engine.yaml")]
    config: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "GRANT_ENGINE_LISTEN", default_value = "0.0.0.0:3000")]
    listen: String,

    /// Log level for the engine's own targets.
    #[arg(long, env = "GRANT_ENGINE_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // RUST_LOG takes precedence over --log-level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("grant_metrics={},info", args.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::load(&args.config)
        .with_context(|| format!("loading configuration from {}", args.config.display()))?;
    info!(
        config = %args.config.display(),
        low_threshold = %config.risk().low_threshold,
        medium_threshold = %config.risk().medium_threshold,
        utilization_basis = ?config.risk().utilization_basis,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    info!(listen = %args.listen, version = env!("CARGO_PKG_VERSION"), "Grant metrics server started");

    axum::serve(listener, router).await?;
    Ok(())
}
