//! codebroker CLI — load config, install logging, serve until Ctrl-C.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codebroker::config::BrokerConfig;
use codebroker::server::{self, AppState};

#[derive(Parser, Debug)]
#[command(
    name = "codebroker",
    version,
    about = "Relay code runs to Judge0 and questions to an LLM for a browser editor"
)]
struct Cli {
    /// YAML config file. Defaults are used for anything it omits.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BrokerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BrokerConfig::default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let state = AppState::from_config(&config).context("building backend clients")?;

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    server::serve(listener, state, shutdown_signal()).await?;
    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl-C, draining connections");
    }
}
