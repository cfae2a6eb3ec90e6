use crate::runtime::task::Runnable;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A per-worker task queue.
///
/// The owning worker pushes and pops at the back (LIFO, for locality);
/// other workers steal from the front.
pub(crate) struct LocalQueue {
    inner: Mutex<VecDeque<Arc<dyn Runnable>>>,
}

impl LocalQueue {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    pub(crate) fn push(&self, runnable: Arc<dyn Runnable>) {
        self.inner.lock().unwrap().push_back(runnable);
    }

    pub(crate) fn pop(&self) -> Option<Arc<dyn Runnable>> {
        self.inner.lock().unwrap().pop_back()
    }

    pub(crate) fn steal(&self) -> Option<Arc<dyn Runnable>> {
        self.inner.lock().unwrap().pop_front()
    }

    /// Drops every queued runnable and returns how many there were.
    pub(crate) fn drain(&self) -> usize {
        let drained: Vec<_> = self.inner.lock().unwrap().drain(..).collect();
        drained.len()
    }
}
