//! Startup wiring for the dashboard.
//!
//! Owns the background tasks:
//! - one collector per plot, sampling its metric provider every tick
//! - the export loop, rendering every plot to PNG on its own cadence

mod build;
mod export;

pub use build::build;
pub use export::{export_loop, export_once, SUMMARY_FILE};

use dash_config::{default_path, load as load_config};
use dash_core::Result;
use dash_theme::Theme;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info};

/// Run the dashboard until Ctrl-C.
///
/// Only startup misconfiguration returns an error; provider and render
/// failures are logged and the affected series simply goes stale.
pub async fn run() -> Result<()> {
    let config = load_config(default_path())?;
    config.validate()?;
    let theme = Theme::from_config(&config.theme)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut tasks = JoinSet::new();

    let catalog = Arc::new(build(&config, theme, &shutdown_rx, &mut tasks)?);
    info!(
        "{} plots registered ({}), sampling every {:?}, keeping {} points",
        catalog.len(),
        catalog.names().collect::<Vec<_>>().join(", "),
        config.sample_interval(),
        config.global.capacity,
    );

    tasks.spawn(export_loop(
        Arc::clone(&catalog),
        config.export.clone(),
        shutdown_rx,
    ));

    tokio::signal::ctrl_c().await?;
    info!("signal received, shutting down.");

    // In-flight ticks and renders finish; no new ones are scheduled.
    let _ = shutdown_tx.send(true);
    while let Some(res) = tasks.join_next().await {
        if let Err(e) = res {
            error!("background task failed: {e}");
        }
    }

    Ok(())
}
