//! # bank-api Server Entry Point
//!
//! Loads configuration from the environment, applies command-line
//! overrides, installs the tracing subscriber and Prometheus recorder, then
//! serves the API until Ctrl-C.
//!
//! Storage is in-memory with no persistence; data is lost on restart.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use bank_api::config::{load_accounts, AppConfig, LogFormat};
use bank_api::state::AppState;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::EnvFilter;

/// Bank advice API server.
///
/// Flags override the corresponding `BANK_*` environment variables.
#[derive(Parser, Debug)]
#[command(name = "bank-api", version, about)]
struct Cli {
    /// Listening port (BANK_PORT).
    #[arg(long)]
    port: Option<u16>,

    /// YAML accounts file enabling bearer-token auth (BANK_ACCOUNTS_FILE).
    #[arg(long, value_name = "PATH")]
    accounts_file: Option<PathBuf>,

    /// Log output format, `text` or `json` (BANK_LOG_FORMAT).
    #[arg(long, value_name = "FORMAT")]
    log_format: Option<LogFormat>,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

fn load_config(cli: Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::from_env().context("invalid environment configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(path) = cli.accounts_file {
        config.accounts = load_accounts(&path)?;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {e}");
        return;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config(Cli::parse())?;
    init_tracing(config.log_format);

    if config.auth_enabled() {
        tracing::info!(accounts = config.accounts.len(), "bearer-token auth enabled");
    } else {
        tracing::warn!("no accounts configured, auth disabled; requests run as system");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let metrics_enabled = config.metrics_enabled;
    let mut state = AppState::with_config(config);
    if metrics_enabled {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install Prometheus recorder")?;
        state = state.with_metrics(handle);
    }

    let app = bank_api::app(state).context("invalid entity route table")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("bank-api listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}
