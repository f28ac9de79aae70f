//! Monitor Error Types

use ring_buffer::BufferError;
use sensor_scheduler::SchedulerError;
use thiserror::Error;

/// Errors that stop the supervisor from starting or finishing a run
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration parsed but is not usable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Buffer could not be created
    #[error("Buffer error: {0}")]
    Buffer(#[from] BufferError),

    /// Task setup or join failed
    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
}
