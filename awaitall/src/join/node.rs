use super::registry::Registry;
use crate::utils::WakerSlot;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

/// Countdown shared between a join and its children's continuations.
struct JoinNode {
    /// Children not yet terminal.
    remaining: AtomicUsize,

    /// Waker of the computation awaiting the join.
    parent: WakerSlot,
}

impl JoinNode {
    fn new(children: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(children),
            parent: WakerSlot::new(),
        }
    }

    /// Called once per child when it reaches a terminal state, whatever
    /// that state is. The last call resumes the parent.
    fn child_terminated(&self, kind: &'static str, ordinal: usize) {
        let before = self.remaining.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(before > 0, "join child completed twice");

        tracing::trace!(
            slot = kind,
            ordinal,
            remaining = before - 1,
            "join child terminal"
        );

        if before == 1 {
            tracing::trace!("all join children terminal; resuming parent");
            self.parent.wake();
        }
    }

    fn is_done(&self) -> bool {
        self.remaining.load(Ordering::Acquire) == 0
    }
}

/// Future that completes once every child of a registry is terminal.
///
/// All children are subscribed when the future is created, so the countdown
/// runs whether or not the future is polled yet. Success and failure count
/// the same: a failing child never cuts the wait short and never cancels its
/// siblings. A child that never settles keeps the future pending forever.
///
/// An empty registry yields a future that is ready on its first poll.
pub struct WaitAll {
    /// `None` once every child is terminal (or if there were none).
    node: Option<Arc<JoinNode>>,
}

impl WaitAll {
    /// Subscribes to every child of `registry`.
    pub fn new<K>(registry: &Registry<'_, K>) -> Self {
        if registry.is_empty() {
            tracing::trace!("join has no children; complete immediately");
            return Self { node: None };
        }

        let node = Arc::new(JoinNode::new(registry.len()));

        for (ordinal, entry) in registry.iter().enumerate() {
            let node = node.clone();
            let kind = entry.slot.kind();

            entry
                .handle
                .subscribe(Box::new(move || node.child_terminated(kind, ordinal)));
        }

        Self { node: Some(node) }
    }

    /// Returns `true` once every child is terminal.
    pub fn is_complete(&self) -> bool {
        self.node.as_ref().is_none_or(|node| node.is_done())
    }
}

impl Future for WaitAll {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let Some(node) = self.node.as_ref() else {
            return Poll::Ready(());
        };

        if !node.is_done() {
            node.parent.register(cx.waker());

            if !node.is_done() {
                return Poll::Pending;
            }
        }

        self.node = None;
        Poll::Ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::join::Slot;
    use crate::runtime::task::TaskHandle;

    use std::task::Waker;

    #[test]
    fn empty_registry_is_ready_at_once() {
        let registry = Registry::<()>::new();
        let mut wait = WaitAll::new(&registry);
        let mut cx = Context::from_waker(Waker::noop());

        assert!(wait.is_complete());
        assert_eq!(Pin::new(&mut wait).poll(&mut cx), Poll::Ready(()));
    }

    #[test]
    fn counts_failures_as_completions() {
        let (first, resolve_first) = TaskHandle::<i32, &str>::pending();
        let (second, resolve_second) = TaskHandle::<i32, &str>::pending();

        let mut registry = Registry::<()>::new();
        registry.push(Slot::Index(0), &first);
        registry.push(Slot::Index(1), &second);

        let mut wait = WaitAll::new(&registry);
        let mut cx = Context::from_waker(Waker::noop());

        resolve_second.fail("second");
        assert_eq!(Pin::new(&mut wait).poll(&mut cx), Poll::Pending);

        resolve_first.succeed(1);
        assert!(wait.is_complete());
        assert_eq!(Pin::new(&mut wait).poll(&mut cx), Poll::Ready(()));
    }
}
