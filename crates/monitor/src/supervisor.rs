//! Supervisor: owns the buffer and stop signal for one observation window

use crate::{MonitorConfig, MonitorError};
use ring_buffer::{BufferStats, GuardedBuffer};
use sensor_scheduler::{
    LogReporter, PeriodicConsumer, PeriodicProducer, Reporter, SampleSource, SimulatedSensor,
    StopSignal, TaskSummary,
};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Outcome of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Producer task counters
    pub producer: TaskSummary,
    /// Consumer task counters
    pub consumer: TaskSummary,
    /// Buffer lifetime counters
    pub buffer: BufferStats,
    /// Samples left unread at shutdown
    pub remaining: usize,
}

/// Starts both periodic tasks, waits out the window, then stops and joins them
#[derive(Debug, Clone)]
pub struct Supervisor {
    config: MonitorConfig,
}

impl Supervisor {
    /// Create a supervisor for a validated configuration
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration in use
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run for the configured window with the simulated sensor and log reporter
    pub async fn run(&self) -> Result<RunSummary, MonitorError> {
        self.run_until(tokio::time::sleep(self.config.run_duration()))
            .await
    }

    /// Run with the simulated sensor and log reporter until `shutdown` resolves
    pub async fn run_until<F>(&self, shutdown: F) -> Result<RunSummary, MonitorError>
    where
        F: Future<Output = ()>,
    {
        let sensor = SimulatedSensor::from_config(&self.config.scheduler_config())?;
        self.run_with(sensor, LogReporter, shutdown).await
    }

    /// Run with a caller-supplied sample source and reporter until `shutdown` resolves
    pub async fn run_with<S, R, F>(
        &self,
        source: S,
        reporter: R,
        shutdown: F,
    ) -> Result<RunSummary, MonitorError>
    where
        S: SampleSource,
        R: Reporter,
        F: Future<Output = ()>,
    {
        let scheduler = self.config.scheduler_config();
        scheduler.validate()?;

        let buffer = Arc::new(GuardedBuffer::new(
            self.config.capacity,
            self.config.overflow_policy,
        )?);
        buffer.init();
        let signal = StopSignal::new();

        let producer = PeriodicProducer::new(
            Arc::clone(&buffer),
            signal.listener(),
            source,
            scheduler.producer_period,
        )?;
        let consumer = PeriodicConsumer::new(
            Arc::clone(&buffer),
            signal.listener(),
            reporter,
            scheduler.consumer_period,
        )?;

        info!(
            "Starting monitor: capacity={}, policy={:?}",
            self.config.capacity, self.config.overflow_policy
        );
        let producer = producer.spawn();
        let consumer = consumer.spawn();

        shutdown.await;

        info!("Stopping {} and {}", producer.name(), consumer.name());
        signal.stop();
        let (producer, consumer) = tokio::join!(producer.join(), consumer.join());

        let summary = RunSummary {
            producer: producer?,
            consumer: consumer?,
            buffer: buffer.stats(),
            remaining: buffer.len(),
        };
        info!(
            "Monitor finished: {} samples written, {} reports, {} left unread",
            summary.buffer.written, summary.consumer.iterations, summary.remaining
        );
        Ok(summary)
    }
}
