//! Runtime that drives task handles to completion.
//!
//! The join combinators only need two things from a scheduler: a way to run
//! computations until they settle their handles, and a place to run the
//! continuations a handle fires when it settles. This module provides both
//! with a small work-stealing executor.
//!
//! It is responsible for:
//! - executing spawned futures and resolving their handles,
//! - managing the global injector and per-worker queues,
//! - installing the thread-local context used by [`task::spawn`],
//! - cooperative yielding.

mod core;
mod executor;
mod work_stealing;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod yield_now;

pub mod task;

pub use self::core::Runtime;
