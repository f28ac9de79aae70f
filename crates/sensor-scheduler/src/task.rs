//! Task Lifecycle

use crate::SchedulerError;
use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Lifecycle of a periodic task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Iterating on its period
    Running,
    /// Stop observed; finishing the current iteration
    Stopping,
    /// Returned; can be joined
    Stopped,
}

/// What a periodic task did over its lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskSummary {
    /// Task name
    pub task: &'static str,
    /// Completed iterations
    pub iterations: u64,
    /// Samples stored (producer) or observed in reports (consumer)
    pub samples: u64,
    /// Writes refused by a full buffer (producer only)
    pub rejected: u64,
    /// Deadlines skipped after an overrun
    pub skipped: u64,
}

/// Publishes state transitions to any number of observers
#[derive(Debug)]
pub(crate) struct StateCell {
    tx: watch::Sender<TaskState>,
}

impl StateCell {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(TaskState::Running);
        Self { tx }
    }

    pub(crate) fn set(&self, state: TaskState) {
        self.tx.send_replace(state);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<TaskState> {
        self.tx.subscribe()
    }
}

/// A spawned periodic task
#[derive(Debug)]
pub struct TaskHandle {
    task: &'static str,
    state: watch::Receiver<TaskState>,
    join: JoinHandle<TaskSummary>,
}

impl TaskHandle {
    pub(crate) fn spawn<F>(task: &'static str, state: watch::Receiver<TaskState>, fut: F) -> Self
    where
        F: Future<Output = TaskSummary> + Send + 'static,
    {
        Self {
            task,
            state,
            join: tokio::spawn(fut),
        }
    }

    /// Task name
    pub fn name(&self) -> &'static str {
        self.task
    }

    /// Latest published state
    pub fn state(&self) -> TaskState {
        *self.state.borrow()
    }

    /// Check if the task has returned
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the task to return
    pub async fn join(self) -> Result<TaskSummary, SchedulerError> {
        let task = self.task;
        self.join.await.map_err(|e| SchedulerError::Join {
            task,
            reason: e.to_string(),
        })
    }
}
