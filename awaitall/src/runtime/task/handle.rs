use super::Resolver;
use super::core::{Continuation, dispatch};
use crate::error::ContractViolation;
use crate::utils::WakerSlot;

use std::fmt;
use std::mem;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

/// Observable state of a [`TaskHandle`].
///
/// A handle makes exactly one transition, from `Pending` to one of the two
/// terminal states, and never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Succeeded,
    Failed,
}

impl Status {
    /// Returns `true` for `Succeeded` and `Failed`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Pending)
    }
}

/// The capability a join needs from a child: subscribe and observe.
///
/// This is object safe so that a single join can wait on children of
/// different value types. [`TaskHandle`] is the implementation shipped with
/// the crate; other handle types can plug into the join engine by
/// implementing it.
pub trait Completion {
    /// Registers `continuation` to run once the child is terminal.
    ///
    /// Any number of continuations may be registered. If the child is
    /// already terminal the continuation is dispatched right away.
    fn subscribe(&self, continuation: Continuation);

    /// Returns `true` once the child reached a terminal state.
    fn is_terminal(&self) -> bool;
}

impl<C: Completion + ?Sized> Completion for &C {
    fn subscribe(&self, continuation: Continuation) {
        (**self).subscribe(continuation)
    }

    fn is_terminal(&self) -> bool {
        (**self).is_terminal()
    }
}

enum State<T, E> {
    Pending,
    Succeeded(T),
    Failed(E),
}

struct Inner<T, E> {
    state: State<T, E>,

    /// Continuations waiting for the transition, in subscription order.
    continuations: Vec<Continuation>,
}

/// State shared by every clone of a handle and by its resolver.
///
/// The mutex serializes the terminal transition against subscriptions, so a
/// continuation is either captured by the transition or dispatched by
/// `subscribe` itself, never both and never neither.
pub(crate) struct HandleCore<T, E> {
    inner: Mutex<Inner<T, E>>,
}

impl<T, E> HandleCore<T, E> {
    fn new(state: State<T, E>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state,
                continuations: Vec::new(),
            }),
        }
    }

    /// Performs the single terminal transition and dispatches continuations.
    pub(crate) fn complete(&self, result: Result<T, E>) -> Result<(), ContractViolation> {
        let continuations = {
            let mut inner = self.inner.lock().unwrap();

            if !matches!(inner.state, State::Pending) {
                return Err(ContractViolation::AlreadyTerminal);
            }

            inner.state = match result {
                Ok(value) => State::Succeeded(value),
                Err(error) => State::Failed(error),
            };

            mem::take(&mut inner.continuations)
        };

        tracing::trace!(
            subscribers = continuations.len(),
            "task handle reached terminal state"
        );

        dispatch(continuations);
        Ok(())
    }

    fn subscribe(&self, continuation: Continuation) {
        let mut inner = self.inner.lock().unwrap();

        if matches!(inner.state, State::Pending) {
            inner.continuations.push(continuation);
            return;
        }

        drop(inner);
        dispatch(vec![continuation]);
    }

    fn status(&self) -> Status {
        match self.inner.lock().unwrap().state {
            State::Pending => Status::Pending,
            State::Succeeded(_) => Status::Succeeded,
            State::Failed(_) => Status::Failed,
        }
    }
}

impl<T: Clone, E: Clone> HandleCore<T, E> {
    fn outcome(&self) -> Result<Result<T, E>, ContractViolation> {
        match &self.inner.lock().unwrap().state {
            State::Pending => Err(ContractViolation::NotTerminal),
            State::Succeeded(value) => Ok(Ok(value.clone())),
            State::Failed(error) => Ok(Err(error.clone())),
        }
    }
}

/// A shared handle to one asynchronous computation.
///
/// The handle is the read side of a computation that eventually succeeds
/// with a `T` or fails with an `E`. Cloning a handle shares it; the
/// terminal outcome is stored once and every clone reads that same outcome,
/// so the computation behind it never runs twice.
///
/// Handles come from [`spawn`](super::spawn), from [`TaskHandle::pending`]
/// (settled later through a [`Resolver`]), or are created already terminal
/// with [`TaskHandle::succeeded`] and [`TaskHandle::failed`].
///
/// A handle is also a future: awaiting it yields its outcome.
///
/// # Examples
///
/// ```rust
/// use awaitall::{Status, TaskHandle};
///
/// let (handle, resolver) = TaskHandle::<u32, String>::pending();
/// let reader = handle.clone();
/// assert_eq!(reader.status(), Status::Pending);
///
/// resolver.succeed(3);
/// assert_eq!(reader.outcome(), Ok(3));
/// assert_eq!(handle.outcome(), Ok(3));
/// ```
pub struct TaskHandle<T, E> {
    core: Arc<HandleCore<T, E>>,

    /// Waker slot of this clone when it is awaited directly.
    waiter: Option<Arc<WakerSlot>>,
}

impl<T, E> TaskHandle<T, E> {
    fn from_state(state: State<T, E>) -> Self {
        Self {
            core: Arc::new(HandleCore::new(state)),
            waiter: None,
        }
    }

    /// Creates a pending handle and the resolver that settles it.
    pub fn pending() -> (Self, Resolver<T, E>) {
        let handle = Self::from_state(State::Pending);
        let resolver = Resolver::new(handle.core.clone());

        (handle, resolver)
    }

    /// Creates a handle that already succeeded with `value`.
    pub fn succeeded(value: T) -> Self {
        Self::from_state(State::Succeeded(value))
    }

    /// Creates a handle that already failed with `error`.
    pub fn failed(error: E) -> Self {
        Self::from_state(State::Failed(error))
    }

    /// Returns the current state without blocking.
    pub fn status(&self) -> Status {
        self.core.status()
    }

    /// Returns `true` once the handle succeeded or failed.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Registers a callback fired once the handle is terminal.
    ///
    /// Callbacks of one handle run in subscription order, as a scheduled
    /// step of the runtime. Subscribing to a terminal handle dispatches the
    /// callback immediately.
    pub fn subscribe<F>(&self, continuation: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.core.subscribe(Box::new(continuation));
    }

    /// Returns `true` if both handles refer to the same computation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.core, &other.core)
    }
}

impl<T: Clone, E: Clone> TaskHandle<T, E> {
    /// Returns the terminal outcome: the value, or the stored failure.
    ///
    /// # Panics
    ///
    /// Panics with [`ContractViolation::NotTerminal`] if the handle is still
    /// pending. Wait for the handle (or a join over it) first.
    pub fn outcome(&self) -> Result<T, E> {
        match self.core.outcome() {
            Ok(outcome) => outcome,
            Err(violation) => panic!("{violation}"),
        }
    }

    /// Like [`outcome`](Self::outcome), but reports a pending handle as an
    /// error instead of panicking.
    pub fn try_outcome(&self) -> Result<Result<T, E>, ContractViolation> {
        self.core.outcome()
    }
}

impl<T, E> Clone for TaskHandle<T, E> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            waiter: None,
        }
    }
}

impl<T, E> fmt::Debug for TaskHandle<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("status", &self.status())
            .finish()
    }
}

impl<T, E> Completion for TaskHandle<T, E> {
    fn subscribe(&self, continuation: Continuation) {
        self.core.subscribe(continuation);
    }

    fn is_terminal(&self) -> bool {
        TaskHandle::is_terminal(self)
    }
}

impl<T: Clone, E: Clone> Future for TaskHandle<T, E> {
    type Output = Result<T, E>;

    /// Resolves with the outcome once the handle is terminal.
    ///
    /// The first pending poll subscribes a continuation that wakes this
    /// clone's waker slot; later polls only refresh the stored waker. The
    /// state is re-checked after registering to avoid a missed wake-up.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let Ok(outcome) = this.core.outcome() {
            return Poll::Ready(outcome);
        }

        match &this.waiter {
            Some(slot) => slot.register(cx.waker()),
            None => {
                let slot = Arc::new(WakerSlot::new());
                slot.register(cx.waker());

                let wake = slot.clone();
                this.core.subscribe(Box::new(move || wake.wake()));
                this.waiter = Some(slot);
            }
        }

        match this.core.outcome() {
            Ok(outcome) => Poll::Ready(outcome),
            Err(_) => Poll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn terminal_constructors() {
        let ok = TaskHandle::<i32, &str>::succeeded(1);
        let err = TaskHandle::<i32, &str>::failed("boom");

        assert_eq!(ok.status(), Status::Succeeded);
        assert_eq!(err.status(), Status::Failed);
        assert_eq!(ok.outcome(), Ok(1));
        assert_eq!(err.outcome(), Err("boom"));
    }

    #[test]
    fn pending_handle_reports_contract_violation() {
        let (handle, _resolver) = TaskHandle::<i32, ()>::pending();

        assert_eq!(handle.try_outcome(), Err(ContractViolation::NotTerminal));
        assert!(!handle.is_terminal());
    }

    #[test]
    #[should_panic(expected = "still pending")]
    fn outcome_on_pending_handle_panics() {
        let (handle, _resolver) = TaskHandle::<i32, ()>::pending();
        let _ = handle.outcome();
    }

    #[test]
    fn second_transition_is_rejected() {
        let handle = TaskHandle::<i32, ()>::succeeded(1);

        assert_eq!(
            handle.core.complete(Ok(2)),
            Err(ContractViolation::AlreadyTerminal)
        );
        assert_eq!(handle.outcome(), Ok(1));
    }

    #[test]
    fn continuations_fire_once_in_subscription_order() {
        let (handle, resolver) = TaskHandle::<(), ()>::pending();
        let order = Arc::new(Mutex::new(Vec::new()));

        for i in 0..3 {
            let order = order.clone();
            handle.subscribe(move || order.lock().unwrap().push(i));
        }

        // No runtime on this thread: continuations run inline on resolve.
        resolver.succeed(());
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn subscribing_after_terminal_still_fires() {
        let handle = TaskHandle::<(), ()>::failed(());
        let fired = Arc::new(AtomicUsize::new(0));

        let counter = fired.clone();
        handle.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_the_outcome() {
        let (handle, resolver) = TaskHandle::<String, ()>::pending();
        let clone = handle.clone();

        assert!(handle.ptr_eq(&clone));
        resolver.succeed(String::from("shared"));

        assert_eq!(handle.outcome(), Ok(String::from("shared")));
        assert_eq!(clone.outcome(), Ok(String::from("shared")));
    }
}
