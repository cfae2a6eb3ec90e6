use crate::runtime::task::Task;

use std::sync::Arc;
use std::task::{Wake, Waker};

impl Wake for Task {
    fn wake(self: Arc<Self>) {
        self.schedule();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.clone().schedule();
    }
}

/// Creates a [`Waker`] that reschedules `task` when woken.
pub(crate) fn make_waker(task: Arc<Task>) -> Waker {
    Waker::from(task)
}
