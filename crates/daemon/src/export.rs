use dash_config::ExportConfig;
use dash_core::{DashError, Result};
use dash_renderer::PlotCatalog;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// File the plot summaries are written to, next to the PNGs.
pub const SUMMARY_FILE: &str = "summary.json";

/// Render every plot into `cfg.output_dir` each `cfg.interval_secs` until
/// `shutdown` turns `true`.
pub async fn export_loop(
    catalog: Arc<PlotCatalog>,
    cfg: ExportConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    if let Err(e) = tokio::fs::create_dir_all(&cfg.output_dir).await {
        error!("cannot create export directory '{}': {e}", cfg.output_dir.display());
        return;
    }

    let mut ticker = time::interval(cfg.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("exporting plots to {}", cfg.output_dir.display());

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = ticker.tick() => {
                let written = export_once(&catalog, &cfg.output_dir, cfg.window).await;
                debug!(written, "export pass finished");
            }
        }
    }
}

/// Render each plot once and write `<name>.png` plus [`SUMMARY_FILE`].
///
/// Failures are logged per plot and never abort the pass.  Returns the
/// number of images written.
pub async fn export_once(catalog: &Arc<PlotCatalog>, dir: &Path, window: i64) -> usize {
    let names: Vec<String> = catalog.names().map(str::to_string).collect();
    let mut written = 0;

    for name in names {
        let rendered = {
            let catalog = Arc::clone(catalog);
            let name = name.clone();
            tokio::task::spawn_blocking(move || catalog.plot_image(&name, window)).await
        };

        match rendered {
            Ok(Ok(png)) => match write_atomic(dir, &format!("{name}.png"), &png).await {
                Ok(()) => written += 1,
                Err(e) => warn!(plot = %name, "cannot write image: {e}"),
            },
            Ok(Err(DashError::EmptySeries(series))) => {
                debug!(plot = %name, "series '{series}' has no data yet");
            }
            Ok(Err(e)) => warn!(plot = %name, "render failed: {e}"),
            Err(e) => error!(plot = %name, "render task panicked: {e}"),
        }
    }

    let summary = match serde_json::to_vec_pretty(&catalog.summary()) {
        Ok(json) => json,
        Err(e) => {
            warn!("cannot serialise summary: {e}");
            return written;
        }
    };
    if let Err(e) = write_atomic(dir, SUMMARY_FILE, &summary).await {
        warn!("cannot write {SUMMARY_FILE}: {e}");
    }

    written
}

/// Write through a temporary file so readers never see a partial image.
async fn write_atomic(dir: &Path, file: &str, bytes: &[u8]) -> Result<()> {
    let tmp = dir.join(format!(".{file}.tmp"));
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, dir.join(file)).await?;
    Ok(())
}
