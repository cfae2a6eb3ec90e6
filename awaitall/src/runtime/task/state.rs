//! Scheduling states of a spawned [`Task`](super::Task).
//!
//! These track whether the task's future is queued or being polled. They
//! are unrelated to the Pending/Succeeded/Failed state of the task handle
//! the future settles.

/// Not queued; waiting for a wake-up.
pub(crate) const IDLE: usize = 0;

/// Sitting in a run queue.
pub(crate) const QUEUED: usize = 1;

/// Being polled by a worker. At most one worker observes this state.
pub(crate) const RUNNING: usize = 2;

/// The future returned `Poll::Ready` and has been dropped.
pub(crate) const COMPLETED: usize = 3;

/// Woken while running; must be requeued once the current poll returns.
pub(crate) const NOTIFIED: usize = 4;
