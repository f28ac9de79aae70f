//! Sample Sources

use crate::{SchedulerConfig, SchedulerError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use tracing::info;

/// Anything that can produce one reading per call
pub trait SampleSource: Send + 'static {
    /// Produce the next reading
    fn sample(&mut self) -> f32;
}

impl<F> SampleSource for F
where
    F: FnMut() -> f32 + Send + 'static,
{
    fn sample(&mut self) -> f32 {
        self()
    }
}

/// Simulated temperature sensor, uniform over a fixed range
#[derive(Debug, Clone)]
pub struct SimulatedSensor {
    rng: StdRng,
    range: Range<f32>,
}

impl SimulatedSensor {
    /// Create a sensor over `range`, seeded from OS entropy
    pub fn new(range: Range<f32>) -> Result<Self, SchedulerError> {
        Self::build(range, StdRng::from_entropy())
    }

    /// Create a sensor with a fixed seed (reproducible readings)
    pub fn with_seed(range: Range<f32>, seed: u64) -> Result<Self, SchedulerError> {
        Self::build(range, StdRng::seed_from_u64(seed))
    }

    /// Create a sensor from scheduler settings
    pub fn from_config(config: &SchedulerConfig) -> Result<Self, SchedulerError> {
        let range = config.sample_min..config.sample_max;
        match config.seed {
            Some(seed) => {
                info!("Seeding simulated sensor with {}", seed);
                Self::with_seed(range, seed)
            }
            None => Self::new(range),
        }
    }

    /// Reading range
    pub fn range(&self) -> Range<f32> {
        self.range.clone()
    }

    fn build(range: Range<f32>, rng: StdRng) -> Result<Self, SchedulerError> {
        if !is_valid_range(range.start, range.end) {
            return Err(SchedulerError::InvalidSampleRange {
                min: range.start,
                max: range.end,
            });
        }
        Ok(Self { rng, range })
    }
}

/// Bounds are finite, ordered, and `max - min` does not overflow `f32`
pub(crate) fn is_valid_range(min: f32, max: f32) -> bool {
    min.is_finite() && max.is_finite() && min < max && (max - min).is_finite()
}

impl SampleSource for SimulatedSensor {
    fn sample(&mut self) -> f32 {
        self.rng.gen_range(self.range.clone())
    }
}
