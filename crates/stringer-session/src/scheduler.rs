//! Cancellable deferred tasks for the two session debounce timers.
//!
//! The session never sleeps. It asks a [`Scheduler`] to remember a task, and
//! the host calls [`crate::EntrySession::tick`] to run whatever has come due.
//! [`ManualScheduler`] keeps logical time that tests advance by hand;
//! [`ClockScheduler`] reads the monotonic clock.

use std::time::{Duration, Instant};

/// Work a session defers until its debounce window passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredTask {
    Validate,
    Autosave,
}

/// Identifies one scheduled task so it can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

pub trait Scheduler {
    /// Remember `task` to run once `delay` has passed.
    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskHandle;

    /// Forget a scheduled task. Unknown or already-run handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);

    /// Forget every scheduled task.
    fn cancel_all(&mut self);

    /// Remove and return the tasks that are due, earliest first.
    fn take_due(&mut self) -> Vec<DeferredTask>;

    /// Number of tasks still waiting.
    fn pending(&self) -> usize;
}

#[derive(Debug)]
struct Timers<T> {
    next_id: u64,
    entries: Vec<(T, TaskHandle, DeferredTask)>,
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }
}

impl<T: Copy + Ord> Timers<T> {
    fn insert(&mut self, due: T, task: DeferredTask) -> TaskHandle {
        self.next_id += 1;
        let handle = TaskHandle(self.next_id);
        self.entries.push((due, handle, task));
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.entries.retain(|(_, h, _)| *h != handle);
    }

    fn take_due(&mut self, now: T) -> Vec<DeferredTask> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|(at, _, _)| *at <= now);
        self.entries = waiting;
        due.sort_by_key(|(at, handle, _)| (*at, *handle));
        due.into_iter().map(|(_, _, task)| task).collect()
    }
}

/// Scheduler on logical time. Nothing comes due until [`Self::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    timers: Timers<Duration>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move logical time forward.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Logical time elapsed since creation.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskHandle {
        self.timers.insert(self.now + delay, task)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.timers.cancel(handle);
    }

    fn cancel_all(&mut self) {
        self.timers.entries.clear();
    }

    fn take_due(&mut self) -> Vec<DeferredTask> {
        self.timers.take_due(self.now)
    }

    fn pending(&self) -> usize {
        self.timers.entries.len()
    }
}

/// Scheduler on the monotonic wall clock, for hosts with a real event loop.
#[derive(Debug, Default)]
pub struct ClockScheduler {
    timers: Timers<Instant>,
}

impl ClockScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When the earliest waiting task comes due, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Instant> {
        self.timers.entries.iter().map(|(at, _, _)| *at).min()
    }
}

impl Scheduler for ClockScheduler {
    fn schedule_after(&mut self, delay: Duration, task: DeferredTask) -> TaskHandle {
        self.timers.insert(Instant::now() + delay, task)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.timers.cancel(handle);
    }

    fn cancel_all(&mut self) {
        self.timers.entries.clear();
    }

    fn take_due(&mut self) -> Vec<DeferredTask> {
        self.timers.take_due(Instant::now())
    }

    fn pending(&self) -> usize {
        self.timers.entries.len()
    }
}
