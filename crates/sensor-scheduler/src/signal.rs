//! Cooperative Stop Signal

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::debug;

#[derive(Debug, Default)]
struct Shared {
    stopped: AtomicBool,
    notify: Notify,
}

/// One-way running → stopped flag owned by the supervisor.
///
/// Tasks get a read-only [`StopListener`]; only the owner can flip it.
#[derive(Debug, Default)]
pub struct StopSignal {
    shared: Arc<Shared>,
}

impl StopSignal {
    /// Create a signal in the running state
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out a read-only view for a task
    pub fn listener(&self) -> StopListener {
        StopListener {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Flip to stopped and wake every sleeping listener.
    ///
    /// Returns `false` if the signal was already stopped.
    pub fn stop(&self) -> bool {
        if self.shared.stopped.swap(true, Ordering::SeqCst) {
            return false;
        }
        debug!("Stop signal raised");
        self.shared.notify.notify_waiters();
        true
    }

    /// Check if the signal is still running
    pub fn is_running(&self) -> bool {
        !self.shared.stopped.load(Ordering::SeqCst)
    }
}

/// Read-only handle on a [`StopSignal`]
#[derive(Debug, Clone)]
pub struct StopListener {
    shared: Arc<Shared>,
}

impl StopListener {
    /// Check if the signal is still running
    pub fn is_running(&self) -> bool {
        !self.shared.stopped.load(Ordering::SeqCst)
    }

    /// Resolve once the signal is stopped (immediately if it already is)
    pub async fn stopped(&self) {
        let notified = self.shared.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent stop() is not missed.
        notified.as_mut().enable();

        if !self.is_running() {
            return;
        }
        notified.await;
    }
}
