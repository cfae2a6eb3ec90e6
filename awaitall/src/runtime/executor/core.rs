use crate::runtime::executor::worker::Worker;
use crate::runtime::task::Task;
use crate::runtime::work_stealing::injector::Injector;
use crate::runtime::work_stealing::queue::LocalQueue;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// Multi-threaded task executor.
///
/// Owns the global injector, one local queue per worker and the worker
/// threads themselves.
pub(crate) struct Executor {
    /// Global injector queue shared by all workers.
    injector: Arc<Injector>,

    /// Local queues, kept so leftover work can be dropped on shutdown.
    locals: Arc<Vec<Arc<LocalQueue>>>,

    /// Join handles for worker threads.
    handles: Vec<JoinHandle<()>>,

    /// Shutdown flag shared with all workers.
    shutdown: Arc<AtomicBool>,
}

impl Executor {
    /// Creates the queues and starts `threads` named worker threads.
    pub(crate) fn new(threads: usize, thread_name: &str) -> Self {
        let injector = Arc::new(Injector::new());
        let shutdown = Arc::new(AtomicBool::new(false));

        let locals: Arc<Vec<_>> = Arc::new(
            (0..threads)
                .map(|_| Arc::new(LocalQueue::new()))
                .collect(),
        );

        let handles = (0..threads)
            .map(|id| {
                let worker = Worker::new(id, locals.clone(), injector.clone());
                let shutdown = shutdown.clone();

                thread::Builder::new()
                    .name(format!("{thread_name}-{id}"))
                    .spawn(move || worker.run(shutdown))
                    .expect("failed to spawn runtime worker thread")
            })
            .collect();

        Self {
            injector,
            locals,
            handles,
            shutdown,
        }
    }

    /// Signals all workers to stop and wakes the parked ones.
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.injector.shutdown();
    }

    /// Queues a future on the global injector.
    ///
    /// Futures submitted after shutdown has begun are dropped.
    pub(crate) fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("runtime is shutting down; dropping spawned future");
            return;
        }

        let task = Arc::new(Task::new(future, self.injector.clone()));
        self.injector.push(task);
    }

    /// Waits for all worker threads, then drops whatever is still queued.
    ///
    /// Queued tasks hold the injector, so clearing the queues here breaks
    /// the reference cycle between them.
    pub(crate) fn join(&mut self) {
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                tracing::error!("runtime worker thread panicked");
            }
        }

        let mut dropped = self.injector.drain();
        for local in self.locals.iter() {
            dropped += local.drain();
        }

        if dropped > 0 {
            tracing::debug!(dropped, "discarded queued work at shutdown");
        }
    }
}
