//! Temperature Monitor Supervisor
//!
//! Owns the shared buffer and stop signal, runs the sensor producer and the
//! report consumer for a bounded window, then shuts both down cooperatively.

mod error;
mod settings;
mod supervisor;

pub use error::MonitorError;
pub use settings::{MonitorConfig, DEFAULT_CONFIG_PATH};
pub use supervisor::{RunSummary, Supervisor};

use tracing::warn;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging (`RUST_LOG` overrides the default `info` level)
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        warn!("Tracing subscriber already installed");
    }
}
