use std::future::Future;
use std::sync::mpsc;

use super::executor::core::Executor;
use super::task::{TaskHandle, settle};

/// The main runtime handle.
///
/// `Runtime` owns the executor threads. It is the scheduler the join
/// combinators rely on: spawned futures settle their [`TaskHandle`]s here
/// and handle continuations are queued here.
///
/// Dropping the runtime stops the workers and discards any work that is
/// still queued.
pub struct Runtime {
    executor: Executor,
}

impl Runtime {
    pub(crate) fn new(worker_threads: usize, thread_name: &str) -> Self {
        tracing::debug!(worker_threads, thread_name, "starting runtime");

        Self {
            executor: Executor::new(worker_threads, thread_name),
        }
    }

    /// Spawns a fallible future onto the runtime and returns its handle.
    ///
    /// The future runs exactly once; every clone of the returned handle
    /// observes the same memoized outcome.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use awaitall::RuntimeBuilder;
    ///
    /// let runtime = RuntimeBuilder::new().worker_threads(1).build();
    /// let handle = runtime.spawn(async { Ok::<_, String>(21 * 2) });
    ///
    /// assert_eq!(runtime.block_on(handle), Ok(42));
    /// ```
    pub fn spawn<F, T, E>(&self, future: F) -> TaskHandle<T, E>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: Send + 'static,
    {
        let (task, handle) = settle(future);
        self.executor.spawn(task);
        handle
    }

    /// Runs a future to completion, blocking the current thread.
    ///
    /// This is the synchronous entry point of the runtime (e.g. in `main`
    /// or tests). The future is executed on a worker and its output is sent
    /// back over a channel.
    ///
    /// # Panics
    ///
    /// Panics if the runtime drops the future before it completes.
    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let (transmitter, receiver) = mpsc::channel();

        self.executor.spawn(async move {
            let result = future.await;
            let _ = transmitter.send(result);
        });

        receiver.recv().expect("block_on failed")
    }
}

impl Drop for Runtime {
    /// Signals the workers to stop, joins them and drops leftover work.
    fn drop(&mut self) {
        self.executor.shutdown();
        self.executor.join();

        tracing::debug!("runtime stopped");
    }
}
