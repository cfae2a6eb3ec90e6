//! Task executor.
//!
//! - [`core`]: executor lifecycle (spawning workers, shutdown, joining),
//! - [`worker`]: the per-thread run loop with work stealing.

pub(crate) mod core;
pub(crate) mod worker;
