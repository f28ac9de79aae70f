//! Monitor Settings

use crate::MonitorError;
use ring_buffer::{OverflowPolicy, DEFAULT_CAPACITY};
use sensor_scheduler::SchedulerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Default config file, overridable with `MONITOR_CONFIG`
pub const DEFAULT_CONFIG_PATH: &str = "monitor.toml";

/// Supervisor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Buffer capacity in samples (default: 10)
    pub capacity: usize,
    /// Producer period in milliseconds (default: 1000)
    pub producer_period_ms: u64,
    /// Consumer period in milliseconds (default: 5000)
    pub consumer_period_ms: u64,
    /// Observation window in milliseconds (default: 30000)
    pub run_duration_ms: u64,
    /// What a write does when the buffer is full
    pub overflow_policy: OverflowPolicy,
    /// Lower bound of simulated readings (°C)
    pub sample_min: f32,
    /// Upper bound of simulated readings (°C)
    pub sample_max: f32,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            producer_period_ms: 1_000,
            consumer_period_ms: 5_000,
            run_duration_ms: 30_000,
            overflow_policy: OverflowPolicy::Overwrite,
            sample_min: 20.0,
            sample_max: 30.0,
            seed: None,
        }
    }
}

impl MonitorConfig {
    /// Load from `$MONITOR_CONFIG` (or `monitor.toml`) layered under
    /// `MONITOR_*` environment variables
    pub fn load() -> Result<Self, MonitorError> {
        let path =
            std::env::var("MONITOR_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(path)
    }

    /// Load from an optional file layered under `MONITOR_*` environment variables
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, MonitorError> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("MONITOR").try_parsing(true))
            .build()?;

        let config: MonitorConfig = settings.try_deserialize()?;
        config.validate()?;
        info!("Loaded monitor config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.capacity == 0 {
            return Err(MonitorError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        self.scheduler_config().validate()?;

        if self.consumer_period_ms <= self.producer_period_ms {
            warn!(
                "Consumer period {}ms is not longer than producer period {}ms",
                self.consumer_period_ms, self.producer_period_ms
            );
        }
        Ok(())
    }

    /// Settings for the periodic tasks
    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            producer_period: Duration::from_millis(self.producer_period_ms),
            consumer_period: Duration::from_millis(self.consumer_period_ms),
            sample_min: self.sample_min,
            sample_max: self.sample_max,
            seed: self.seed,
        }
    }

    /// Observation window
    pub fn run_duration(&self) -> Duration {
        Duration::from_millis(self.run_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensor_scheduler::SchedulerError;

    #[test]
    fn test_defaults_match_reference() {
        let config = MonitorConfig::default();
        assert_eq!(config.capacity, 10);
        assert_eq!(config.run_duration(), Duration::from_secs(30));
        assert_eq!(config.scheduler_config().producer_period, Duration::from_secs(1));
        assert_eq!(config.scheduler_config().consumer_period, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_invalid() {
        let config = MonitorConfig {
            capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MonitorError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_period_invalid() {
        let config = MonitorConfig {
            producer_period_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(MonitorError::Scheduler(SchedulerError::ZeroPeriod("producer")))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("monitor-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "capacity = 4\noverflow_policy = \"reject\"\nseed = 9\n",
        )
        .unwrap();

        let config = MonitorConfig::load_from(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.capacity, 4);
        assert_eq!(config.overflow_policy, OverflowPolicy::Reject);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.producer_period_ms, 1_000);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = MonitorConfig::load_from("does-not-exist.toml").unwrap();
        assert_eq!(config, MonitorConfig::default());
    }
}
