//! Periodic Sensor Producer

use crate::render::sample_line;
use crate::task::StateCell;
use crate::{SampleSource, SchedulerError, StopListener, TaskHandle, TaskState, TaskSummary, Ticker};
use chrono::Local;
use ring_buffer::GuardedBuffer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

const TASK: &str = "producer";

/// Samples a source on a fixed period and writes each reading to the buffer
pub struct PeriodicProducer<S> {
    buffer: Arc<GuardedBuffer<f32>>,
    stop: StopListener,
    source: S,
    period: Duration,
    state: StateCell,
}

impl<S: SampleSource> PeriodicProducer<S> {
    /// Create a producer; `period` must be non-zero
    pub fn new(
        buffer: Arc<GuardedBuffer<f32>>,
        stop: StopListener,
        source: S,
        period: Duration,
    ) -> Result<Self, SchedulerError> {
        if period.is_zero() {
            return Err(SchedulerError::ZeroPeriod(TASK));
        }

        Ok(Self {
            buffer,
            stop,
            source,
            period,
            state: StateCell::new(),
        })
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.state.subscribe()
    }

    /// Run on the tokio runtime
    pub fn spawn(self) -> TaskHandle {
        let state = self.subscribe();
        TaskHandle::spawn(TASK, state, self.run())
    }

    /// Run until the stop signal is observed
    pub async fn run(mut self) -> TaskSummary {
        info!("Starting sensor producer (period={:?})", self.period);

        let mut ticker = Ticker::new(self.period);
        let mut summary = TaskSummary {
            task: TASK,
            ..Default::default()
        };

        loop {
            if !self.stop.is_running() {
                self.state.set(TaskState::Stopping);
                debug!("Producer observed stop signal");
                break;
            }

            self.produce_once(&mut summary);
            summary.iterations += 1;

            ticker.wait(&self.stop).await;
        }

        summary.skipped = ticker.skipped();
        self.state.set(TaskState::Stopped);
        info!(
            "Sensor producer stopped: {} iterations, {} stored, {} rejected",
            summary.iterations, summary.samples, summary.rejected
        );
        summary
    }

    fn produce_once(&mut self, summary: &mut TaskSummary) {
        let value = self.source.sample();

        if self.buffer.write(value) {
            summary.samples += 1;
            info!("{}", sample_line(value, &Local::now()));
        } else {
            summary.rejected += 1;
            debug!("Sample {:.2} dropped: buffer full", value);
        }
    }
}
