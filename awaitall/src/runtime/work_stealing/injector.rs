use crate::runtime::task::Runnable;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

/// Shared handle to the global task injector.
pub(crate) type InjectorHandle = Arc<Injector>;

/// Global FIFO queue of runnables.
///
/// Continuations fired by a settling handle are pushed here as one batch,
/// so on a single worker they run in the order they were scheduled. The
/// condition variable lets idle workers sleep until work arrives.
pub(crate) struct Injector {
    queue: Mutex<VecDeque<Arc<dyn Runnable>>>,

    /// Signalled on every push and on shutdown.
    available: Condvar,

    shutdown: AtomicBool,
}

impl Injector {
    pub(crate) fn new() -> Self {
        Injector {
            queue: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Marks the injector as shut down and wakes every parked worker.
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.available.notify_all();
    }

    /// Pushes a runnable to the back of the queue.
    pub(crate) fn push(&self, runnable: Arc<dyn Runnable>) {
        self.queue.lock().unwrap().push_back(runnable);
        self.available.notify_one();
    }

    /// Parks the calling worker until work arrives or shutdown starts.
    ///
    /// The wait is bounded so workers periodically re-check other workers'
    /// local queues, which do not signal the condition variable.
    pub(crate) fn park(&self) {
        if self.shutdown.load(Ordering::Acquire) {
            return;
        }

        let queue = self.queue.lock().unwrap();
        if !queue.is_empty() {
            return;
        }

        let _ = self
            .available
            .wait_timeout(queue, Duration::from_millis(1))
            .unwrap();
    }

    /// Takes the runnable at the front of the queue.
    pub(crate) fn steal(&self) -> Option<Arc<dyn Runnable>> {
        self.queue.lock().unwrap().pop_front()
    }

    /// Drops every queued runnable and returns how many there were.
    pub(crate) fn drain(&self) -> usize {
        let drained: Vec<_> = self.queue.lock().unwrap().drain(..).collect();
        drained.len()
    }
}
