use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

use crate::TaskError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerStatus {
    Pending,
    Running,
    Suspended,
    Completed,
    Cancelled,
    Failed,
}

impl WorkerStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WorkerStatus::Completed | WorkerStatus::Cancelled | WorkerStatus::Failed
        )
    }
}

const PENDING: u8 = 0;
const RUNNING: u8 = 1;
const SUSPENDED: u8 = 2;
const COMPLETED: u8 = 3;
const CANCELLED: u8 = 4;
const FAILED: u8 = 5;

pub(crate) struct WorkerShared {
    state: AtomicU8,
    progress_bits: AtomicU64,
    cancel: AtomicBool,
    error: Mutex<Option<TaskError>>,
}

impl WorkerShared {
    pub(crate) fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
            progress_bits: AtomicU64::new(0f64.to_bits()),
            cancel: AtomicBool::new(false),
            error: Mutex::new(None),
        }
    }

    pub(crate) fn set_status(&self, status: WorkerStatus) {
        let raw = match status {
            WorkerStatus::Pending => PENDING,
            WorkerStatus::Running => RUNNING,
            WorkerStatus::Suspended => SUSPENDED,
            WorkerStatus::Completed => COMPLETED,
            WorkerStatus::Cancelled => CANCELLED,
            WorkerStatus::Failed => FAILED,
        };
        self.state.store(raw, Ordering::Relaxed);
    }

    pub(crate) fn status(&self) -> WorkerStatus {
        match self.state.load(Ordering::Relaxed) {
            PENDING => WorkerStatus::Pending,
            RUNNING => WorkerStatus::Running,
            SUSPENDED => WorkerStatus::Suspended,
            COMPLETED => WorkerStatus::Completed,
            CANCELLED => WorkerStatus::Cancelled,
            _ => WorkerStatus::Failed,
        }
    }

    pub(crate) fn set_progress(&self, value: f64) {
        self.progress_bits.store(value.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn progress(&self) -> f64 {
        f64::from_bits(self.progress_bits.load(Ordering::Relaxed))
    }

    pub(crate) fn cancel_requested(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    pub(crate) fn set_error(&self, error: TaskError) {
        if let Ok(mut slot) = self.error.lock() {
            *slot = Some(error);
        }
    }
}

/// Handle to one submitted task. Cloneable; all clones observe the same
/// progress and terminal state.
#[derive(Clone)]
pub struct Worker {
    id: u64,
    shared: Arc<WorkerShared>,
}

impl Worker {
    pub(crate) fn new(id: u64, shared: Arc<WorkerShared>) -> Self {
        Self { id, shared }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn status(&self) -> WorkerStatus {
        self.shared.status()
    }

    /// Fraction of units completed, non-decreasing, exactly 1.0 only once
    /// the task has completed.
    pub fn progress(&self) -> f64 {
        self.shared.progress()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.status().is_terminal()
    }

    /// Request cooperative cancellation. Observed at the task's next
    /// suspension point; work applied before that point stays applied.
    pub fn cancel(&self) {
        self.shared.cancel.store(true, Ordering::Relaxed);
    }

    /// The captured fault, once the status is `Failed`.
    pub fn error(&self) -> Option<TaskError> {
        self.shared.error.lock().ok().and_then(|slot| slot.clone())
    }
}
