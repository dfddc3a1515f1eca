use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::worker::{Worker, WorkerShared, WorkerStatus};
use crate::{TaskError, UnitTask};

/// Per-tick processing allowance.
///
/// `WorkTime` is the production mode: wall-clock time spent running units.
/// `UnitLimit` trades time for a fixed unit quota, which makes scheduling
/// deterministic.
#[derive(Clone, Copy, Debug)]
pub enum Budget {
    WorkTime(Duration),
    UnitLimit(u64),
}

impl Budget {
    fn exhausted(&self, started: Instant, units_run: u64) -> bool {
        // Always let at least one unit through so a tick can never stall a
        // task indefinitely, whatever the budget.
        if units_run == 0 {
            return false;
        }
        match self {
            Budget::WorkTime(limit) => started.elapsed() >= *limit,
            Budget::UnitLimit(limit) => units_run >= *limit,
        }
    }
}

/// Terminal notification for one task, delivered through
/// [`Scheduler::drain_events`].
#[derive(Clone, Copy, Debug)]
pub struct TaskDone {
    pub id: u64,
    pub status: WorkerStatus,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TickStats {
    pub units_run: u64,
    pub tasks_completed: usize,
    pub tasks_failed: usize,
    pub tasks_cancelled: usize,
    /// Tasks still queued (parked or pending) when the tick ended.
    pub tasks_waiting: usize,
}

struct ScheduledTask {
    id: u64,
    shared: Arc<WorkerShared>,
    task: Box<dyn UnitTask>,
    cursor: u64,
    total: u64,
}

enum UnitOutcome {
    Advanced,
    Finished,
    Failed(TaskError),
    Cancelled,
}

/// Cooperative executor: every submitted task advances in bounded slices,
/// one scheduler tick at a time, in submission order.
pub struct Scheduler {
    queue: VecDeque<ScheduledTask>,
    budget: Budget,
    next_id: u64,
    done_tx: Sender<TaskDone>,
    done_rx: Receiver<TaskDone>,
}

impl Scheduler {
    pub fn new(budget: Budget) -> Self {
        let (done_tx, done_rx) = unbounded();
        Self {
            queue: VecDeque::new(),
            budget,
            next_id: 0,
            done_tx,
            done_rx,
        }
    }

    #[inline]
    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn set_budget(&mut self, budget: Budget) {
        self.budget = budget;
    }

    /// Number of tasks not yet in a terminal state.
    #[inline]
    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Register a task without running any of it. Work starts on the next
    /// tick; the returned handle is valid immediately.
    pub fn submit<T>(&mut self, task: T) -> Worker
    where
        T: UnitTask + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        let total = task.unit_count();
        let shared = Arc::new(WorkerShared::new());
        log::debug!("task {id} submitted ({total} units)");
        self.queue.push_back(ScheduledTask {
            id,
            shared: Arc::clone(&shared),
            task: Box::new(task),
            cursor: 0,
            total,
        });
        Worker::new(id, shared)
    }

    /// Run queued tasks until the tick's budget is spent.
    ///
    /// Tasks are served in submission order; the budget is checked between
    /// units (the suspension point), and the task holding the slot when it
    /// runs out is parked with its cursor intact. A task that fits in the
    /// remaining budget completes within this tick.
    pub fn tick(&mut self) -> TickStats {
        let started = Instant::now();
        let mut stats = TickStats::default();

        while let Some(mut entry) = self.queue.pop_front() {
            if entry.shared.cancel_requested() {
                self.finish(&entry, WorkerStatus::Cancelled);
                stats.tasks_cancelled += 1;
                continue;
            }
            entry.shared.set_status(WorkerStatus::Running);

            let outcome = loop {
                if entry.cursor >= entry.total {
                    break UnitOutcome::Finished;
                }
                if self.budget.exhausted(started, stats.units_run) {
                    break UnitOutcome::Advanced;
                }
                match entry.task.run_unit(entry.cursor) {
                    Ok(()) => {
                        entry.cursor += 1;
                        stats.units_run += 1;
                        if entry.cursor < entry.total {
                            entry
                                .shared
                                .set_progress(entry.cursor as f64 / entry.total as f64);
                        }
                    }
                    Err(err) => break UnitOutcome::Failed(err),
                }
                if entry.shared.cancel_requested() {
                    break UnitOutcome::Cancelled;
                }
            };

            match outcome {
                UnitOutcome::Finished => {
                    entry.shared.set_progress(1.0);
                    self.finish(&entry, WorkerStatus::Completed);
                    stats.tasks_completed += 1;
                }
                UnitOutcome::Failed(err) => {
                    log::warn!("task {} failed at unit {}: {err}", entry.id, entry.cursor);
                    entry.shared.set_error(err);
                    self.finish(&entry, WorkerStatus::Failed);
                    stats.tasks_failed += 1;
                }
                UnitOutcome::Cancelled => {
                    self.finish(&entry, WorkerStatus::Cancelled);
                    stats.tasks_cancelled += 1;
                }
                UnitOutcome::Advanced => {
                    // Budget spent: park at the front so this task resumes
                    // first next tick.
                    entry.shared.set_status(WorkerStatus::Suspended);
                    self.queue.push_front(entry);
                    break;
                }
            }
        }

        stats.tasks_waiting = self.queue.len();
        stats
    }

    /// Collect terminal notifications without blocking.
    pub fn drain_events(&self) -> Vec<TaskDone> {
        self.done_rx.try_iter().collect()
    }

    fn finish(&self, entry: &ScheduledTask, status: WorkerStatus) {
        entry.shared.set_status(status);
        let _ = self.done_tx.send(TaskDone {
            id: entry.id,
            status,
        });
    }
}
