//! Log Line Rendering

use chrono::{DateTime, TimeZone};
use ring_buffer::{BufferReport, ErrorKind};
use std::fmt::Display;
use tracing::{info, warn};

/// Unit appended to every rendered reading
pub const UNIT: &str = "°C";

/// `[HH:MM:SS] Temperature logged: 23.45°C`
pub fn sample_line<Tz>(value: f32, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("[{}] Temperature logged: {:.2}{}", at.format("%H:%M:%S"), value, UNIT)
}

/// Destination for the consumer's periodic reports
pub trait Reporter: Send + 'static {
    /// Render one inspection, including the condition recorded since the last one
    fn report(&mut self, report: &BufferReport<f32>);
}

/// Writes reports through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, report: &BufferReport<f32>) {
        info!(
            "Current Buffer Contents ({}/{}):",
            report.len(),
            report.capacity
        );
        for line in report.to_string().lines() {
            info!("{}", line);
        }

        match report.last_error {
            ErrorKind::None => info!("{}", report.last_error),
            ErrorKind::Overflow | ErrorKind::Underflow => warn!("{}", report.last_error),
        }
    }
}
