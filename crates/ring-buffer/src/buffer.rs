//! Lock-Guarded Ring Buffer Implementation

use crate::{BufferError, BufferReport, ErrorKind, RingStore};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// What a write does when the buffer is full.
///
/// The policy also fixes how [`GuardedBuffer::inspect`] behaves, so the two
/// are never mixed: overwriting pairs with a non-destructive snapshot,
/// rejecting pairs with a destructive drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Discard the oldest unread entry; writes never fail
    #[default]
    Overwrite,
    /// Refuse the write and leave the buffer untouched
    Reject,
}

/// Counters accumulated over the buffer's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    /// Samples stored (including ones that evicted an older entry)
    pub written: usize,
    /// Entries discarded by overwrites
    pub overwritten: usize,
    /// Writes refused while full
    pub rejected: usize,
}

struct Inner<T> {
    store: RingStore<T>,
    last_error: ErrorKind,
}

/// Thread-safe ring buffer shared by one producer and one consumer.
///
/// Every operation holds the lock for its full duration, so no caller can
/// observe a partial cursor update.
pub struct GuardedBuffer<T> {
    inner: Mutex<Inner<T>>,
    policy: OverflowPolicy,
    capacity: usize,
    written: AtomicUsize,
    overwritten: AtomicUsize,
    rejected: AtomicUsize,
}

impl<T: Copy + Default> GuardedBuffer<T> {
    /// Create a new buffer with the given capacity and overflow policy
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Result<Self, BufferError> {
        let store = RingStore::new(capacity)?;
        debug!("Creating guarded buffer: capacity={}, policy={:?}", capacity, policy);

        Ok(Self {
            inner: Mutex::new(Inner {
                store,
                last_error: ErrorKind::None,
            }),
            policy,
            capacity,
            written: AtomicUsize::new(0),
            overwritten: AtomicUsize::new(0),
            rejected: AtomicUsize::new(0),
        })
    }
}

impl<T: Copy> GuardedBuffer<T> {
    /// Reset to empty and clear the recorded condition
    pub fn init(&self) {
        let mut inner = self.lock();
        inner.store.init();
        inner.last_error = ErrorKind::None;
    }

    /// Write a sample. Returns whether it was stored.
    pub fn write(&self, value: T) -> bool {
        self.try_write(value).is_ok()
    }

    /// Write a sample, applying the overflow policy when full
    pub fn try_write(&self, value: T) -> Result<(), BufferError> {
        let mut inner = self.lock();

        let value = match inner.store.try_write(value) {
            Ok(()) => {
                self.written.fetch_add(1, Ordering::Relaxed);
                return Ok(());
            }
            Err(value) => value,
        };

        match self.policy {
            OverflowPolicy::Overwrite => {
                inner.store.force_write(value);
                inner.last_error = ErrorKind::Overflow;
                self.written.fetch_add(1, Ordering::Relaxed);
                self.overwritten.fetch_add(1, Ordering::Relaxed);
                debug!("Buffer full: overwriting oldest sample");
                Ok(())
            }
            OverflowPolicy::Reject => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                debug!("Buffer full: rejecting sample");
                Err(BufferError::Full {
                    capacity: self.capacity,
                })
            }
        }
    }

    /// Read the oldest sample, or `None` when empty
    pub fn read(&self) -> Option<T> {
        self.try_read().ok()
    }

    /// Read the oldest sample; an empty buffer records an underflow
    pub fn try_read(&self) -> Result<T, BufferError> {
        let mut inner = self.lock();

        match inner.store.try_read() {
            Some(value) => Ok(value),
            None => {
                inner.last_error = ErrorKind::Underflow;
                warn!("Buffer underflow: no samples to read");
                Err(BufferError::Empty)
            }
        }
    }

    /// Collect the current contents for display.
    ///
    /// Under [`OverflowPolicy::Overwrite`] this is a snapshot that leaves the
    /// buffer untouched; under [`OverflowPolicy::Reject`] the buffer is
    /// drained. Either way the whole pass happens under one lock acquisition,
    /// which also takes and clears the recorded [`ErrorKind`].
    pub fn inspect(&self) -> BufferReport<T> {
        let mut inner = self.lock();

        let (entries, drained): (Vec<T>, bool) = match self.policy {
            OverflowPolicy::Overwrite => (inner.store.snapshot().collect(), false),
            OverflowPolicy::Reject => {
                let store = &mut inner.store;
                (std::iter::from_fn(|| store.try_read()).collect(), true)
            }
        };

        let last_error = std::mem::take(&mut inner.last_error);
        BufferReport::new(entries, drained, self.capacity).with_last_error(last_error)
    }

    /// Return the most recent recorded condition and clear it
    pub fn last_error(&self) -> ErrorKind {
        std::mem::take(&mut self.lock().last_error)
    }

    /// Number of unread samples
    pub fn len(&self) -> usize {
        self.lock().store.len()
    }

    /// Check if there is nothing to read
    pub fn is_empty(&self) -> bool {
        self.lock().store.is_empty()
    }

    /// Check if the next write hits the overflow policy
    pub fn is_full(&self) -> bool {
        self.lock().store.is_full()
    }

    /// Fixed capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured overflow policy
    pub fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Get fill ratio (0.0 to 1.0)
    pub fn fill_ratio(&self) -> f64 {
        self.len() as f64 / self.capacity as f64
    }

    /// Lifetime counters
    pub fn stats(&self) -> BufferStats {
        BufferStats {
            written: self.written.load(Ordering::Relaxed),
            overwritten: self.overwritten.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    // Critical sections are single-step mutations, so a panic elsewhere while
    // holding the lock cannot leave the store torn.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> std::fmt::Debug for GuardedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GuardedBuffer")
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
