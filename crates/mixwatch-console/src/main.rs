//! mixwatch - terminal status console for a mix network bulletin board.
//!
//! Polls the board's `/data` snapshot on a fixed interval, resolves raw
//! endpoint addresses to node/client names through a session-lifetime
//! cache, and renders role-colored status tables.

mod config;
mod dashboard;
mod display;
mod refresh;
mod render;
mod table;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;

use mixwatch_client::StatusClient;

use crate::config::ConsoleConfig;
use crate::dashboard::Dashboard;

#[derive(Parser, Debug)]
#[command(name = "mixwatch")]
#[command(version, about = "Terminal status console for a mix network bulletin board")]
struct Args {
    /// Path to a config file (defaults to <config_dir>/mixwatch/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bulletin board base URL (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Refresh interval in milliseconds (overrides the config file).
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ConsoleConfig::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.endpoint.base_url = base_url;
    }
    if let Some(interval_ms) = args.interval_ms {
        config.refresh.interval_ms = interval_ms;
    }

    tracing::info!(
        base_url = %config.endpoint.base_url,
        interval_ms = config.refresh.interval_ms,
        "starting mixwatch"
    );

    let client = StatusClient::new(&config.endpoint.base_url);
    let dashboard = Arc::new(RwLock::new(Dashboard::new()));

    refresh::load_header(&client, &config.endpoint.header_path, &dashboard).await;

    let interval = Duration::from_millis(config.refresh.interval_ms.max(1));
    tokio::spawn(refresh::run_refresh_loop(
        client,
        config.endpoint.data_path.clone(),
        dashboard.clone(),
        interval,
    ));

    ui::run_console(dashboard).await
}
