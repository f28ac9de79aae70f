//! Scheduler Configuration

use crate::sensor::is_valid_range;
use crate::SchedulerError;
use std::time::Duration;

/// Configuration for the producer and consumer tasks
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Time between samples (default: 1s)
    pub producer_period: Duration,
    /// Time between reports (default: 5s)
    pub consumer_period: Duration,
    /// Lower bound of simulated readings, inclusive (°C)
    pub sample_min: f32,
    /// Upper bound of simulated readings, exclusive (°C)
    pub sample_max: f32,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            producer_period: Duration::from_secs(1),
            consumer_period: Duration::from_secs(5),
            sample_min: 20.0,
            sample_max: 30.0,
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Check periods and sample range
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.producer_period.is_zero() {
            return Err(SchedulerError::ZeroPeriod("producer"));
        }
        if self.consumer_period.is_zero() {
            return Err(SchedulerError::ZeroPeriod("consumer"));
        }
        if !is_valid_range(self.sample_min, self.sample_max) {
            return Err(SchedulerError::InvalidSampleRange {
                min: self.sample_min,
                max: self.sample_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SchedulerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.consumer_period > config.producer_period);
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = SchedulerConfig {
            consumer_period: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SchedulerError::ZeroPeriod("consumer"))
        ));
    }

    #[test]
    fn test_overflowing_range_rejected() {
        let config = SchedulerConfig {
            sample_min: -3.0e38,
            sample_max: 3.0e38,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SchedulerError::InvalidSampleRange { .. })
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = SchedulerConfig {
            sample_min: 30.0,
            sample_max: 20.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SchedulerError::InvalidSampleRange { .. })
        ));
    }
}
