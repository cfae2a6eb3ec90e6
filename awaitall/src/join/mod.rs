//! Await-all combinators.
//!
//! Each entry point takes a collection of [`TaskHandle`]s and returns one
//! [`Gather`] future that:
//!
//! 1. subscribes to every child as soon as it is created,
//! 2. completes only after **every** child is terminal, counting failures
//!    the same as successes (siblings of a failing child are never
//!    cancelled),
//! 3. then reads the children in canonical order and yields either the
//!    reassembled container or the first failure in that order.
//!
//! Canonical order is insertion order for [`join_map`], index order for
//! [`join_sequence`] and position order for [`join_tuple`] / [`join!`]. It
//! does not depend on completion timing: if the first child fails last and
//! the second fails first, the first child's error is reported.
//!
//! ```rust
//! use awaitall::{RuntimeBuilder, TaskHandle, join_map};
//!
//! let runtime = RuntimeBuilder::new().worker_threads(1).build();
//!
//! let result = runtime.block_on(async {
//!     join_map([
//!         ("a", TaskHandle::<i32, &str>::failed("a failed")),
//!         ("b", TaskHandle::succeeded(5)),
//!     ])
//!     .await
//! });
//!
//! assert_eq!(result, Err("a failed"));
//! ```
//!
//! [`TaskHandle`]: crate::TaskHandle
//! [`join!`]: crate::join!

mod gather;
mod map;
mod node;
mod registry;
mod sequence;
mod tuple;

pub use gather::{Adapter, Gather};
pub use map::MapAdapter;
pub use node::WaitAll;
pub use registry::{Entry, Registry, Slot};
pub use sequence::SequenceAdapter;
pub use tuple::TupleAdapter;

use crate::runtime::task::TaskHandle;

use std::hash::Hash;

/// Joins a mapping of handles into a mapping of results.
///
/// The output has the same keys in the same (insertion) order as the input.
/// An empty input completes on the first poll with an empty map.
pub fn join_map<K, V, E, I>(handles: I) -> Gather<MapAdapter<K, V, E>>
where
    I: IntoIterator<Item = (K, TaskHandle<V, E>)>,
    K: Hash + Eq,
    V: Clone,
    E: Clone,
{
    Gather::new(MapAdapter::new(handles))
}

/// Joins a sequence of handles into a `Vec` of results in the same order.
///
/// An empty input completes on the first poll with an empty `Vec`.
///
/// ```rust
/// use awaitall::{RuntimeBuilder, TaskHandle, join_sequence};
///
/// let runtime = RuntimeBuilder::new().worker_threads(1).build();
/// let values = runtime.block_on(async {
///     join_sequence(vec![
///         TaskHandle::<i32, ()>::succeeded(10),
///         TaskHandle::succeeded(20),
///         TaskHandle::succeeded(30),
///     ])
///     .await
/// });
///
/// assert_eq!(values, Ok(vec![10, 20, 30]));
/// ```
pub fn join_sequence<V, E, I>(handles: I) -> Gather<SequenceAdapter<V, E>>
where
    I: IntoIterator<Item = TaskHandle<V, E>>,
    V: Clone,
    E: Clone,
{
    Gather::new(SequenceAdapter::new(handles))
}

/// Joins a tuple of handles into a tuple of results.
///
/// ```rust
/// use awaitall::{RuntimeBuilder, TaskHandle, join_tuple};
///
/// let runtime = RuntimeBuilder::new().worker_threads(1).build();
/// let pair = runtime.block_on(async {
///     join_tuple((
///         TaskHandle::<i32, ()>::succeeded(1),
///         TaskHandle::<&str, ()>::succeeded("x"),
///     ))
///     .await
/// });
///
/// assert_eq!(pair, Ok((1, "x")));
/// ```
pub fn join_tuple<H>(handles: H) -> Gather<TupleAdapter<H>>
where
    TupleAdapter<H>: Adapter,
{
    Gather::new(TupleAdapter::new(handles))
}
