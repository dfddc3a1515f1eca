//! Worktime-limited cooperative task scheduler and worker handles.
#![forbid(unsafe_code)]

mod scheduler;
mod worker;

use std::error::Error;
use std::fmt;

pub use scheduler::{Budget, Scheduler, TaskDone, TickStats};
pub use worker::{Worker, WorkerStatus};

/// A resumable unit of work: a fixed number of units, each addressable by
/// index so a parked task resumes exactly where it left off.
///
/// The gap between two units is the task's suspension point: the scheduler
/// may park, cancel, or interleave other tasks there, and nowhere else.
pub trait UnitTask: Send {
    /// Total number of units this task will run. Queried once at submission.
    fn unit_count(&self) -> u64;

    /// Execute the unit at `index`. Units are invoked in order, each exactly
    /// once; an error terminates the task and is captured on its worker.
    fn run_unit(&mut self, index: u64) -> Result<(), TaskError>;
}

/// Unrecoverable fault inside a task body. Captured on the worker that ran
/// the task, never propagated across tasks.
#[derive(Clone, Debug)]
pub struct TaskError {
    message: String,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for TaskError {}
