use crate::runtime::context::{CURRENT_WORKER_ID, enter_context};
use crate::runtime::task::Runnable;
use crate::runtime::work_stealing::injector::InjectorHandle;
use crate::runtime::work_stealing::queue::LocalQueue;
use crate::utils::panic_message;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A worker thread in the executor.
///
/// Work is looked up in this order:
/// 1. the worker's own local queue,
/// 2. the global injector,
/// 3. other workers' local queues,
/// 4. otherwise the worker parks briefly.
pub(crate) struct Worker {
    id: usize,

    /// All local queues (one per worker), used for stealing.
    locals: Arc<Vec<Arc<LocalQueue>>>,

    injector: InjectorHandle,
}

impl Worker {
    pub(crate) fn new(
        id: usize,
        locals: Arc<Vec<Arc<LocalQueue>>>,
        injector: InjectorHandle,
    ) -> Self {
        Self {
            id,
            locals,
            injector,
        }
    }

    /// Runs the worker loop until `shutdown` is set.
    ///
    /// The runtime context stays installed for the whole loop, so anything a
    /// runnable triggers (spawns, handle continuations) is scheduled on this
    /// runtime.
    pub(crate) fn run(&self, shutdown: Arc<AtomicBool>) {
        CURRENT_WORKER_ID.with(|id| *id.borrow_mut() = Some(self.id));
        tracing::trace!(worker = self.id, "worker started");

        enter_context(self.injector.clone(), self.locals.clone(), || {
            while !shutdown.load(Ordering::Acquire) {
                match self.next_runnable() {
                    Some(runnable) => self.run_guarded(runnable),
                    None => self.injector.park(),
                }
            }
        });

        CURRENT_WORKER_ID.with(|id| *id.borrow_mut() = None);
        tracing::trace!(worker = self.id, "worker exited");
    }

    /// Runs one runnable; a panic is logged and the worker keeps going.
    fn run_guarded(&self, runnable: Arc<dyn Runnable>) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| runnable.run())) {
            tracing::error!(
                worker = self.id,
                panic = panic_message(&*payload),
                "runnable panicked"
            );
        }
    }

    fn next_runnable(&self) -> Option<Arc<dyn Runnable>> {
        self.locals[self.id]
            .pop()
            .or_else(|| self.injector.steal())
            .or_else(|| self.try_steal())
    }

    /// Attempts to steal from another worker, visiting victims round-robin.
    fn try_steal(&self) -> Option<Arc<dyn Runnable>> {
        let len = self.locals.len();

        if len <= 1 {
            return None;
        }

        (1..len)
            .map(|offset| (self.id + offset) % len)
            .find_map(|victim| self.locals[victim].steal())
    }
}
