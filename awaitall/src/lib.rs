//! # awaitall
//!
//! **awaitall** turns a collection of independently pending computations into
//! one computation that finishes only when all of them have finished.
//!
//! The collection can be a mapping ([`join_map`]), a sequence
//! ([`join_sequence`]) or a fixed-arity tuple ([`join_tuple`], [`join!`]).
//! The combined computation:
//!
//! - waits for **every** child to reach a terminal state, success or failure,
//!   without cancelling siblings of a failed child,
//! - then reads the children in canonical order (insertion, index or
//!   position order) and returns either a container of the same shape or the
//!   failure of the first failing child **in that order**, not the first one
//!   to fail in time.
//!
//! Children are [`TaskHandle`]s: shared, memoized handles to a computation.
//! A small work-stealing [`Runtime`] drives them and schedules the
//! continuations they fire when they settle.
//!
//! ## Quick Start
//!
//! ```rust
//! use awaitall::{RuntimeBuilder, join_sequence, task};
//!
//! let runtime = RuntimeBuilder::new().worker_threads(2).build();
//!
//! let squares = runtime.block_on(async {
//!     let handles: Vec<_> = (1..=3u64)
//!         .map(|n| task::spawn(async move { Ok::<_, String>(n * n) }))
//!         .collect();
//!
//!     join_sequence(handles).await
//! });
//!
//! assert_eq!(squares, Ok(vec![1, 4, 9]));
//! ```
//!
//! ## Modules
//!
//! - [`join`]: the join combinators, adapters and engine
//! - [`task`]: task handles, resolvers and `spawn`
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (handle transitions, join progress,
//! runtime lifecycle) and never installs a subscriber itself.

mod error;
mod runtime;
mod utils;

pub mod join;

pub use error::ContractViolation;
pub use join::{Gather, join_map, join_sequence, join_tuple};
pub use runtime::Runtime;
pub use runtime::builder::RuntimeBuilder;
pub use runtime::task;
pub use runtime::task::{Completion, Resolver, Status, TaskHandle};
pub use runtime::yield_now::yield_now;

pub use awaitall_macros::*;
