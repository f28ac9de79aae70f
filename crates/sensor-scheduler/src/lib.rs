//! Periodic Sensor Tasks
//!
//! A producer that samples a sensor on a fixed period and a consumer that
//! reports the shared buffer on a longer one. Both pace themselves against
//! absolute deadlines and stop cooperatively on a shared [`StopSignal`].

mod config;
mod consumer;
mod error;
mod producer;
mod render;
mod sensor;
mod signal;
mod task;
mod ticker;

pub use config::SchedulerConfig;
pub use consumer::PeriodicConsumer;
pub use error::SchedulerError;
pub use producer::PeriodicProducer;
pub use render::{sample_line, LogReporter, Reporter, UNIT};
pub use sensor::{SampleSource, SimulatedSensor};
pub use signal::{StopListener, StopSignal};
pub use task::{TaskHandle, TaskState, TaskSummary};
pub use ticker::{Ticker, Wake};
