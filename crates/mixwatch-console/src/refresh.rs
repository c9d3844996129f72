//! The polling refresh loop driving fetch → render → display updates.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use mixwatch_client::StatusClient;

use crate::dashboard::Dashboard;

/// One-shot banner load at startup. Failure degrades to the default
/// banner; it is never fatal and never surfaced on the status line.
pub async fn load_header(client: &StatusClient, path: &str, dashboard: &Arc<RwLock<Dashboard>>) {
    match client.fetch_header(path).await {
        Ok(text) => {
            dashboard.write().await.set_banner(text);
        }
        Err(e) => {
            tracing::warn!(error = %e, "header load failed, continuing without banner");
        }
    }
}

/// Run refresh cycles forever: one immediately, then one per interval
/// tick. A failed cycle reports its error and the schedule continues;
/// nothing short of process exit stops the loop.
pub async fn run_refresh_loop(
    client: StatusClient,
    data_path: String,
    dashboard: Arc<RwLock<Dashboard>>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        ticker.tick().await;
        run_cycle(&client, &data_path, &dashboard).await;
    }
}

/// A single fetch-and-display cycle.
pub async fn run_cycle(client: &StatusClient, data_path: &str, dashboard: &Arc<RwLock<Dashboard>>) {
    match client.fetch_snapshot(data_path).await {
        Ok(snapshot) => {
            dashboard.write().await.apply_snapshot(&snapshot);
        }
        Err(e) => {
            tracing::error!(error = %e, "refresh cycle failed");
            dashboard.write().await.record_error(&e);
        }
    }
}
