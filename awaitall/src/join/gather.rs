use super::node::WaitAll;
use super::registry::{Registry, Slot};
use crate::error::ContractViolation;
use crate::runtime::task::TaskHandle;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// The shape of a joined collection.
///
/// An adapter owns the children, exposes them to the join engine as a
/// [`Registry`] in canonical order, and reassembles their outcomes into a
/// container of the same shape once every child is terminal.
pub trait Adapter {
    /// Key type of [`Slot::Key`]; `()` for shapes addressed by position.
    type Key;

    /// The assembled container.
    type Output;

    /// The children's shared failure type.
    type Error;

    /// Lists the children in canonical order.
    fn registry(&self) -> Registry<'_, Self::Key>;

    /// Reads every child in canonical order.
    ///
    /// Only called once all children are terminal. Returns the first
    /// failure in canonical order, unchanged, or the full container.
    fn extract(self) -> Result<Self::Output, Self::Error>;
}

/// Reads one terminal child for an adapter's extraction pass.
pub(crate) fn extract_child<K, T, E>(
    slot: Slot<&K>,
    handle: &TaskHandle<T, E>,
) -> Result<T, E>
where
    T: Clone,
    E: Clone,
{
    let outcome = handle.outcome();

    if outcome.is_err() {
        match slot {
            Slot::Key(_) => tracing::debug!("join failed at a keyed child"),
            Slot::Index(index) => tracing::debug!(index, "join failed at a sequence child"),
            Slot::Position(position) => {
                tracing::debug!(position, "join failed at a tuple child")
            }
        }
    }

    outcome
}

/// The combined computation returned by every join entry point.
///
/// Creating a `Gather` subscribes to all children right away. Awaiting it
/// suspends until every child is terminal, then extracts the result in
/// canonical order: either the assembled container or the failure of the
/// first failing child in that order, even when a later child failed
/// earlier in time.
///
/// # Panics
///
/// Polling again after it returned panics with
/// [`ContractViolation::PolledAfterCompletion`].
#[must_use = "a join does nothing unless awaited"]
pub struct Gather<A> {
    adapter: Option<A>,
    wait: WaitAll,
}

impl<A: Adapter> Gather<A> {
    pub fn new(adapter: A) -> Self {
        let wait = {
            let registry = adapter.registry();
            tracing::debug!(children = registry.len(), "join created");
            WaitAll::new(&registry)
        };

        Self {
            adapter: Some(adapter),
            wait,
        }
    }

    /// Returns `true` once every child is terminal.
    pub fn is_complete(&self) -> bool {
        self.wait.is_complete()
    }
}

// `adapter` is never pinned: it is only moved out by value once ready.
impl<A> Unpin for Gather<A> {}

impl<A: Adapter> Future for Gather<A> {
    type Output = Result<A::Output, A::Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if Pin::new(&mut this.wait).poll(cx).is_pending() {
            return Poll::Pending;
        }

        let Some(adapter) = this.adapter.take() else {
            panic!("{}", ContractViolation::PolledAfterCompletion);
        };

        debug_assert!(
            adapter
                .registry()
                .iter()
                .all(|entry| entry.handle.is_terminal()),
            "join resumed before every child was terminal"
        );

        tracing::trace!("join resumed; extracting results");
        Poll::Ready(adapter.extract())
    }
}
