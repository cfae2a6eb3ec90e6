use super::Runtime;

use std::thread;

/// Builder for configuring and creating a [`Runtime`].
///
/// # Examples
///
/// ```rust
/// use awaitall::RuntimeBuilder;
///
/// let runtime = RuntimeBuilder::new()
///     .worker_threads(1)
///     .thread_name("join-worker")
///     .build();
///
/// assert_eq!(runtime.block_on(async { 7 }), 7);
/// ```
pub struct RuntimeBuilder {
    /// Number of worker threads in the executor.
    worker_threads: usize,

    /// Prefix of the worker thread names; the worker id is appended.
    thread_name: String,
}

impl RuntimeBuilder {
    /// Creates a builder with default configuration.
    ///
    /// The number of worker threads defaults to the number of available
    /// logical CPUs, falling back to `1` if it cannot be determined.
    pub fn new() -> Self {
        let worker_threads = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            worker_threads,
            thread_name: String::from("awaitall-worker"),
        }
    }

    /// Sets the number of worker threads used by the runtime.
    ///
    /// A single worker gives a strictly cooperative, single-threaded
    /// scheduler in which continuations run one at a time in the order
    /// they were scheduled.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn worker_threads(mut self, n: usize) -> Self {
        assert!(n > 0, "worker_threads must be > 0");

        self.worker_threads = n;
        self
    }

    /// Sets the name prefix of worker threads.
    pub fn thread_name(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name = prefix.into();
        self
    }

    /// Builds the runtime and starts its workers.
    pub fn build(self) -> Runtime {
        Runtime::new(self.worker_threads, &self.thread_name)
    }
}

impl Default for RuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
