//! Periodic Report Consumer

use crate::render::UNIT;
use crate::task::StateCell;
use crate::{Reporter, SchedulerError, StopListener, TaskHandle, TaskState, TaskSummary, Ticker};
use ring_buffer::GuardedBuffer;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

const TASK: &str = "consumer";

/// Inspects the buffer on a fixed period and hands each report to a [`Reporter`].
///
/// Never writes to the buffer. Whether inspection drains depends on the
/// buffer's overflow policy.
pub struct PeriodicConsumer<R> {
    buffer: Arc<GuardedBuffer<f32>>,
    stop: StopListener,
    reporter: R,
    period: Duration,
    state: StateCell,
}

impl<R: Reporter> PeriodicConsumer<R> {
    /// Create a consumer; `period` must be non-zero
    pub fn new(
        buffer: Arc<GuardedBuffer<f32>>,
        stop: StopListener,
        reporter: R,
        period: Duration,
    ) -> Result<Self, SchedulerError> {
        if period.is_zero() {
            return Err(SchedulerError::ZeroPeriod(TASK));
        }

        Ok(Self {
            buffer,
            stop,
            reporter,
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
        info!("Starting report consumer (period={:?})", self.period);

        let mut ticker = Ticker::new(self.period);
        let mut summary = TaskSummary {
            task: TASK,
            ..Default::default()
        };

        loop {
            if !self.stop.is_running() {
                self.state.set(TaskState::Stopping);
                debug!("Consumer observed stop signal");
                break;
            }

            let report = self.buffer.inspect().with_unit(UNIT);
            self.reporter.report(&report);

            summary.samples += report.len() as u64;
            summary.iterations += 1;

            ticker.wait(&self.stop).await;
        }

        summary.skipped = ticker.skipped();
        self.state.set(TaskState::Stopped);
        info!(
            "Report consumer stopped: {} reports, {} samples observed",
            summary.iterations, summary.samples
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PeriodicProducer, StopSignal};
    use ring_buffer::{BufferReport, ErrorKind, OverflowPolicy};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Collect(Arc<Mutex<Vec<BufferReport<f32>>>>);

    impl Reporter for Collect {
        fn report(&mut self, report: &BufferReport<f32>) {
            self.0.lock().unwrap().push(report.clone());
        }
    }

    fn counter() -> impl FnMut() -> f32 + Send + 'static {
        let mut next = 0.0;
        move || {
            next += 1.0;
            next
        }
    }

    async fn run_pair(
        policy: OverflowPolicy,
        window: Duration,
    ) -> (Arc<GuardedBuffer<f32>>, Collect, TaskSummary, TaskSummary) {
        let buffer = Arc::new(GuardedBuffer::new(10, policy).unwrap());
        let signal = StopSignal::new();
        let collect = Collect::default();

        let producer = PeriodicProducer::new(
            Arc::clone(&buffer),
            signal.listener(),
            counter(),
            Duration::from_secs(1),
        )
        .unwrap()
        .spawn();
        let consumer = PeriodicConsumer::new(
            Arc::clone(&buffer),
            signal.listener(),
            collect.clone(),
            Duration::from_secs(5),
        )
        .unwrap()
        .spawn();

        tokio::time::sleep(window).await;
        signal.stop();

        let produced = producer.join().await.unwrap();
        let consumed = consumer.join().await.unwrap();
        (buffer, collect, produced, consumed)
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_reports_under_overwrite() {
        let (buffer, collect, produced, consumed) =
            run_pair(OverflowPolicy::Overwrite, Duration::from_millis(15_500)).await;

        assert_eq!(consumed.iterations, 4);
        assert_eq!(produced.iterations, 16);

        let reports = collect.0.lock().unwrap();
        assert_eq!(reports.len(), 4);
        assert!(reports[0].len() <= 1);
        assert!(reports.iter().all(|r| !r.drained && r.capacity == 10));

        // By t = 15 the buffer has wrapped and holds the latest ten samples.
        let last = &reports[3];
        assert_eq!(last.len(), 10);
        assert!(last.entries.windows(2).all(|w| w[1] == w[0] + 1.0));
        assert_eq!(last.last_error, ErrorKind::Overflow);
        // The report took the marker.
        assert_eq!(buffer.last_error(), ErrorKind::None);

        // Snapshots do not consume.
        assert_eq!(buffer.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_reports_under_reject() {
        let (buffer, collect, produced, consumed) =
            run_pair(OverflowPolicy::Reject, Duration::from_millis(12_500)).await;

        let reports = collect.0.lock().unwrap();
        assert!(reports.iter().all(|r| r.drained));

        // Every stored sample is reported exactly once or still buffered.
        let reported: Vec<f32> = reports.iter().flat_map(|r| r.entries.clone()).collect();
        assert_eq!(consumed.samples as usize, reported.len());
        assert_eq!(reported.len() + buffer.len(), produced.samples as usize);
        assert!(reported.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(produced.rejected, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_buffer_report() {
        let buffer = Arc::new(GuardedBuffer::new(10, OverflowPolicy::Overwrite).unwrap());
        let signal = StopSignal::new();
        let collect = Collect::default();

        let handle = PeriodicConsumer::new(
            Arc::clone(&buffer),
            signal.listener(),
            collect.clone(),
            Duration::from_secs(5),
        )
        .unwrap()
        .spawn();

        tokio::time::sleep(Duration::from_secs(1)).await;
        signal.stop();
        let summary = handle.join().await.unwrap();

        assert_eq!(summary.iterations, 1);
        let reports = collect.0.lock().unwrap();
        assert_eq!(reports[0].to_string(), "Buffer is empty");
        assert_eq!(reports[0].last_error, ErrorKind::None);
    }
}
