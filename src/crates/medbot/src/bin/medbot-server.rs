//! medbot server binary
//!
//! Serves the health assistant pipeline over HTTP.

use anyhow::Context;
use clap::Parser;
use medbot::api::{create_router, AppState};
use medbot::config::ServerConfig;
use medbot::{MetricsRecorder, Orchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "medbot-server", version, about = "Multilingual health assistant server")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen host, overrides the configuration
    #[arg(long)]
    host: Option<String>,

    /// Listen port, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    tracing::info!("Loading server configuration...");
    let mut config = ServerConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("validating configuration")?;

    tracing::info!("Server name: {}", config.server.name);
    tracing::info!("Generation backend: {}", config.generation.api_url);
    tracing::info!("Search engine: {}", config.search.searx_host);
    tracing::info!("Drug database: {}", config.drugs.base_url);
    if config.generation.api_key.trim().is_empty() {
        tracing::warn!("ADDIS_ASSISTANT_API_KEY is not set; generation requests will fail until it is");
    }

    let orchestrator = Orchestrator::from_config(&config).context("building pipeline")?;
    let state = AppState::new(Arc::new(orchestrator), MetricsRecorder::new()).with_name(config.server.name.clone());
    let app = create_router(state);

    let addr = config.bind_address();
    tracing::info!("Starting medbot server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("medbot server shut down gracefully");
    Ok(())
}

/// Signal for graceful shutdown (Ctrl-C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install CTRL-C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL-C signal, shutting down");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, shutting down");
        }
    }
}
