//! Scheduler Error Types

use thiserror::Error;

/// Errors from configuring or joining periodic tasks
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// A period of zero would spin without sleeping
    #[error("{0} period must be non-zero")]
    ZeroPeriod(&'static str),

    /// Sample range is empty or not finite
    #[error("Invalid sample range [{min}, {max})")]
    InvalidSampleRange { min: f32, max: f32 },

    /// Task panicked or was aborted before returning
    #[error("Task {task} did not finish cleanly: {reason}")]
    Join { task: &'static str, reason: String },
}
