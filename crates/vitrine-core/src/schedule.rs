#![forbid(unsafe_code)]

//! Host-driven task scheduler with cancellation handles.
//!
//! Two primitives stand in for `requestAnimationFrame` and `setTimeout`:
//!
//! - [`Scheduler::request_frame`] queues a task for the next frame boundary.
//! - [`Scheduler::schedule_after`] queues a task for when the virtual clock
//!   has advanced by at least the given delay.
//!
//! Tasks are plain values. The scheduler never runs anything itself: the
//! host calls [`Scheduler::drain_frame`] and [`Scheduler::advance`], and
//! hands the returned tasks back to their owners.
//!
//! # Invariants
//!
//! 1. The virtual clock is monotonic; [`Scheduler::advance_to`] with an
//!    earlier instant is a no-op.
//! 2. Due timers are returned in deadline order, ties broken by scheduling
//!    order.
//! 3. Frame tasks requested while a frame is being drained land in the
//!    *next* frame.
//! 4. A cancelled task is never returned.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Cancel after run | Handle already returned | `cancel` returns `false` |
//! | Cancel twice | Handle already cancelled | `cancel` returns `false` |
//! | Clock moved backwards | Host bug | Clock stays put |

use std::time::Duration;

/// Handle for a pending task, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Get the raw handle value.
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Timer<T> {
    handle: TaskHandle,
    due: Duration,
    task: T,
}

/// Deterministic scheduler of frame and timer tasks.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_handle: u64,
    frame: Vec<(TaskHandle, T)>,
    timers: Vec<Timer<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create a scheduler with its clock at zero.
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_handle: 1,
            frame: Vec::new(),
            timers: Vec::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    fn next_handle(&mut self) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Queue a task for the next frame boundary.
    pub fn request_frame(&mut self, task: impl Into<T>) -> TaskHandle {
        let handle = self.next_handle();
        self.frame.push((handle, task.into()));
        handle
    }

    /// Queue a task to run once `delay` has elapsed on the virtual clock.
    pub fn schedule_after(&mut self, delay: Duration, task: impl Into<T>) -> TaskHandle {
        let handle = self.next_handle();
        self.timers.push(Timer {
            handle,
            due: self.now.saturating_add(delay),
            task: task.into(),
        });
        handle
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        if let Some(idx) = self.frame.iter().position(|(h, _)| *h == handle) {
            self.frame.remove(idx);
            return true;
        }
        if let Some(idx) = self.timers.iter().position(|t| t.handle == handle) {
            self.timers.remove(idx);
            return true;
        }
        false
    }

    /// Whether the task behind `handle` is still pending.
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.frame.iter().any(|(h, _)| *h == handle)
            || self.timers.iter().any(|t| t.handle == handle)
    }

    /// Number of pending tasks (frame and timer).
    #[inline]
    pub fn pending(&self) -> usize {
        self.frame.len() + self.timers.len()
    }

    /// Whether any frame task is waiting.
    #[inline]
    pub fn has_frame_tasks(&self) -> bool {
        !self.frame.is_empty()
    }

    /// Earliest timer deadline, if any timer is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Take every task queued for this frame, in request order.
    pub fn drain_frame(&mut self) -> Vec<T> {
        std::mem::take(&mut self.frame)
            .into_iter()
            .map(|(_, task)| task)
            .collect()
    }

    /// Advance the clock by `elapsed` and return the timers that came due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        let now = self.now.saturating_add(elapsed);
        self.advance_to(now)
    }

    /// Move the clock to `now` and return the timers that came due.
    pub fn advance_to(&mut self, now: Duration) -> Vec<T> {
        if now > self.now {
            self.now = now;
        }
        let current = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|t| t.due <= current);
        self.timers = pending;

        due.sort_by_key(|t| (t.due, t.handle));
        due.into_iter().map(|t| t.task).collect()
    }
}
