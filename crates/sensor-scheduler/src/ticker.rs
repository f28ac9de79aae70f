//! Absolute-Deadline Pacing

use crate::StopListener;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::warn;

/// Why [`Ticker::wait`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The deadline passed
    Deadline,
    /// The stop signal was raised during the sleep
    Stop,
}

/// Sleeps to fixed absolute deadlines `start + n * period`.
///
/// Time spent on work between waits does not shift later deadlines.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    deadline: Instant,
    skipped: u64,
}

impl Ticker {
    /// Start a ticker whose first deadline is one period from now.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "ticker period must be non-zero");
        Self {
            period,
            deadline: Instant::now() + period,
            skipped: 0,
        }
    }

    /// Sleep until the next deadline or until `stop` is raised
    pub async fn wait(&mut self, stop: &StopListener) -> Wake {
        let wake = tokio::select! {
            biased;
            _ = stop.stopped() => Wake::Stop,
            _ = sleep_until(self.deadline) => Wake::Deadline,
        };

        if wake == Wake::Deadline {
            self.advance(Instant::now());
        }
        wake
    }

    /// Next deadline
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Deadlines dropped because an iteration overran them
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn advance(&mut self, now: Instant) {
        self.deadline += self.period;
        if self.deadline > now {
            return;
        }

        // Overran by one or more whole periods: skip them, keep the phase.
        let behind = now - self.deadline;
        let whole = behind.as_nanos() / self.period.as_nanos();
        let realigned = u32::try_from(whole)
            .ok()
            .and_then(|n| n.checked_add(1))
            .and_then(|n| Some((n, self.deadline.checked_add(self.period.checked_mul(n)?)?)));

        let missed = match realigned {
            Some((n, deadline)) => {
                self.deadline = deadline;
                u64::from(n)
            }
            None => {
                // Too far behind to count in periods; restart the phase from now.
                self.deadline = now + self.period;
                u64::try_from(whole).unwrap_or(u64::MAX).saturating_add(1)
            }
        };
        self.skipped = self.skipped.saturating_add(missed);
        warn!("Periodic task overran, skipped {} deadline(s)", missed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StopSignal;

    #[tokio::test(start_paused = true)]
    async fn test_deadlines_are_absolute() {
        let signal = StopSignal::new();
        let listener = signal.listener();
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1));

        for n in 1..=3u32 {
            // Simulated work inside the period must not push the next deadline.
            tokio::time::advance(Duration::from_millis(300)).await;
            assert_eq!(ticker.wait(&listener).await, Wake::Deadline);
            assert_eq!(Instant::now(), start + Duration::from_secs(1) * n);
        }
        assert_eq!(ticker.skipped(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrun_skips_missed_deadlines() {
        let signal = StopSignal::new();
        let listener = signal.listener();
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(1));

        tokio::time::advance(Duration::from_millis(2500)).await;
        assert_eq!(ticker.wait(&listener).await, Wake::Deadline);

        assert_eq!(ticker.deadline(), start + Duration::from_secs(3));
        assert_eq!(ticker.skipped(), 1);
    }

    #[test]
    fn test_extreme_overrun_does_not_wrap() {
        let mut ticker = Ticker::new(Duration::from_nanos(1));
        // Ten seconds of 1ns periods is more than u32::MAX missed deadlines.
        let now = ticker.deadline() + Duration::from_secs(10);

        ticker.advance(now);

        assert!(ticker.deadline() > now);
        assert!(ticker.deadline() <= now + Duration::from_nanos(1));
        assert!(ticker.skipped() > u64::from(u32::MAX));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_interrupts_sleep() {
        let signal = StopSignal::new();
        let listener = signal.listener();
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_secs(5));

        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            signal.stop();
        });

        assert_eq!(ticker.wait(&listener).await, Wake::Stop);
        assert!(Instant::now() - start < Duration::from_secs(5));
        stopper.await.unwrap();
    }
}
