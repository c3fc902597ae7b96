//! dash — a self-hosted status dashboard for a single host.
//!
//! Run with:  `RUST_LOG=info dash`

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("dash v{} starting", env!("CARGO_PKG_VERSION"));

    dash_daemon::run().await.map_err(Into::into)
}
