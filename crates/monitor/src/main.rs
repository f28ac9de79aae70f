//! Temperature Monitor - Main Entry Point

use anyhow::Context;
use monitor::{init_logging, MonitorConfig, Supervisor};
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Temperature Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config = MonitorConfig::load().context("failed to load monitor configuration")?;
    let supervisor = Supervisor::new(config)?;
    let deadline = Instant::now() + supervisor.config().run_duration();

    let summary = supervisor
        .run_until(async move {
            tokio::select! {
                _ = sleep_until(deadline) => info!("Observation window elapsed"),
                result = tokio::signal::ctrl_c() => match result {
                    Ok(()) => info!("Interrupted, stopping early"),
                    Err(e) => {
                        warn!("Cannot listen for Ctrl-C: {}", e);
                        sleep_until(deadline).await;
                    }
                },
            }
        })
        .await?;

    info!(
        "Run complete: {} stored, {} overwritten, {} rejected",
        summary.buffer.written, summary.buffer.overwritten, summary.buffer.rejected
    );
    Ok(())
}
