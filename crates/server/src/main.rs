//! Server binary: parse flags, start the automation bridge, serve.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sheetgate_host::{AutomationHost, BridgeConfig, StdioBridge};
use sheetgate_server::{create_router, ServerConfig};

/// sheetgate - local HTTP API over a live spreadsheet automation host
#[derive(Parser)]
#[command(name = "sheetgate-server")]
#[command(author, version, about = "Local HTTP API over a live spreadsheet automation host", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 3001)]
    port: u16,

    /// Origin allowed for cross-origin requests
    #[arg(long, default_value = "https://localhost:3000")]
    origin: String,

    /// Path to the automation helper executable
    #[arg(long, value_name = "PATH")]
    helper: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig {
        bind: format!("{}:{}", cli.bind, cli.port),
        allowed_origin: cli.origin,
    };

    let bridge = StdioBridge::start(BridgeConfig {
        helper_path: cli.helper,
    })
    .context("failed to start the automation helper")?;
    let host: Arc<dyn AutomationHost> = Arc::new(bridge);

    let app = create_router(&config, host)
        .with_context(|| format!("invalid CORS origin: {}", config.allowed_origin))?;

    tracing::info!("sheetgate-server listening on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    axum::serve(listener, app).await?;

    Ok(())
}
