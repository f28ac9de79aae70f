//! Guarded Ring Buffer
//!
//! Provides a fixed-capacity ring buffer for sensor samples and a
//! lock-guarded wrapper that lets one producer and one consumer share it.

mod buffer;
mod error;
mod report;
mod store;

pub use buffer::{BufferStats, GuardedBuffer, OverflowPolicy};
pub use error::{BufferError, ErrorKind};
pub use report::BufferReport;
pub use store::{RingStore, Snapshot, DEFAULT_CAPACITY};
