//! Work-stealing queues.
//!
//! - [`injector`]: the global FIFO queue that receives externally spawned
//!   tasks and handle continuations,
//! - [`queue`]: per-worker queues for tasks spawned from a worker.

pub(crate) mod injector;
pub(crate) mod queue;
