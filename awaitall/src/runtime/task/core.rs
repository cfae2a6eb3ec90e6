use super::state::{COMPLETED, IDLE, NOTIFIED, QUEUED, RUNNING};
use super::{Resolver, TaskHandle};
use crate::runtime::context::{CURRENT_LOCALS, CURRENT_WORKER_ID, current_injector};
use crate::runtime::task::waker::make_waker;
use crate::runtime::work_stealing::injector::Injector;
use crate::utils::panic_message;

use std::cell::UnsafeCell;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

/// A callback fired once when a task handle reaches a terminal state.
pub type Continuation = Box<dyn FnOnce() + Send + 'static>;

type BoxFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A unit of work the scheduler can run.
///
/// Both spawned futures ([`Task`]) and batches of handle continuations
/// ([`Continuations`]) go through the same queues as `Arc<dyn Runnable>`.
pub(crate) trait Runnable: Send + Sync {
    fn run(self: Arc<Self>);
}

/// A spawned future together with its scheduling state.
pub(crate) struct Task {
    /// The future being driven, dropped as soon as it completes.
    ///
    /// Only accessed by the worker that moved `state` to `RUNNING`.
    future: UnsafeCell<Option<BoxFuture>>,

    /// One of the constants in [`state`](super::state).
    state: AtomicUsize,

    /// Queue used to reschedule the task when it is woken.
    injector: Arc<Injector>,
}

// SAFETY: `future` is only touched while `state == RUNNING`, which a single
// worker can hold at a time; everything else is atomics or `Arc`.
unsafe impl Send for Task {}
unsafe impl Sync for Task {}

impl Task {
    /// Creates a task in the `QUEUED` state.
    pub(crate) fn new<F>(future: F, injector: Arc<Injector>) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            future: UnsafeCell::new(Some(Box::pin(future))),
            state: AtomicUsize::new(QUEUED),
            injector,
        }
    }

    /// Polls the future once.
    ///
    /// - `Poll::Pending`: back to `IDLE`, or requeued if woken meanwhile.
    /// - `Poll::Ready`: the future is dropped and the task is `COMPLETED`.
    /// - panic: same as `Poll::Ready`; the handle is never settled.
    fn poll_once(self: Arc<Self>) {
        let current = self.state.load(Ordering::Acquire);

        if current != QUEUED && current != NOTIFIED {
            return;
        }

        if self
            .state
            .compare_exchange(current, RUNNING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        let waker = make_waker(self.clone());
        let mut cx = Context::from_waker(&waker);

        // SAFETY: the RUNNING state grants exclusive access to the cell.
        let slot = unsafe { &mut *self.future.get() };
        let Some(future) = slot.as_mut() else {
            self.state.store(COMPLETED, Ordering::Release);
            return;
        };

        let polled = panic::catch_unwind(AssertUnwindSafe(|| future.as_mut().poll(&mut cx)));

        match polled {
            Ok(Poll::Pending) => {
                if self
                    .state
                    .compare_exchange(RUNNING, IDLE, Ordering::AcqRel, Ordering::Acquire)
                    .is_err()
                {
                    // Woken while running.
                    self.state.store(QUEUED, Ordering::Release);
                    self.injector.push(self.clone());
                }
            }
            Ok(Poll::Ready(())) => {
                *slot = None;
                self.state.store(COMPLETED, Ordering::Release);
            }
            Err(payload) => {
                tracing::error!(
                    panic = panic_message(&*payload),
                    "spawned task panicked; its handle stays pending"
                );

                *slot = None;
                self.state.store(COMPLETED, Ordering::Release);
            }
        }
    }

    /// Requeues the task after a wake-up.
    ///
    /// An `IDLE` task is pushed to the injector; a `RUNNING` task is marked
    /// `NOTIFIED` so it is requeued when its current poll returns.
    pub(crate) fn schedule(self: Arc<Self>) {
        loop {
            match self.state.load(Ordering::Acquire) {
                IDLE => {
                    if self
                        .state
                        .compare_exchange(IDLE, QUEUED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        self.injector.push(self.clone());
                        return;
                    }
                }
                RUNNING => {
                    if self
                        .state
                        .compare_exchange(RUNNING, NOTIFIED, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok()
                    {
                        return;
                    }
                }
                _ => return,
            }
        }
    }
}

impl Runnable for Task {
    fn run(self: Arc<Self>) {
        self.poll_once()
    }
}

/// A batch of continuations from one settled handle.
///
/// Running the batch invokes them in subscription order.
struct Continuations {
    batch: Mutex<Vec<Continuation>>,
}

impl Runnable for Continuations {
    fn run(self: Arc<Self>) {
        let batch = std::mem::take(&mut *self.batch.lock().unwrap());

        for continuation in batch {
            run_guarded(continuation);
        }
    }
}

/// Runs one continuation, logging a panic instead of unwinding into the
/// rest of its batch.
fn run_guarded(continuation: Continuation) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(continuation)) {
        tracing::error!(
            panic = panic_message(&*payload),
            "task handle continuation panicked"
        );
    }
}

/// Hands continuations to the scheduler.
///
/// Inside a runtime the batch is queued on the injector and runs as its own
/// scheduling step, never on the stack of the code that settled the handle.
/// Outside any runtime there is no scheduler to defer to, so the batch runs
/// inline on the calling thread, i.e. whichever thread settled the handle.
/// That may be a thread foreign to every runtime, so continuations must not
/// assume they run on a worker.
pub(crate) fn dispatch(continuations: Vec<Continuation>) {
    if continuations.is_empty() {
        return;
    }

    match current_injector() {
        Some(injector) => injector.push(Arc::new(Continuations {
            batch: Mutex::new(continuations),
        })),
        None => {
            for continuation in continuations {
                run_guarded(continuation);
            }
        }
    }
}

/// Wraps a fallible future so that running it settles a fresh handle.
pub(crate) fn settle<F, T, E>(future: F) -> (impl Future<Output = ()> + Send + 'static, TaskHandle<T, E>)
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let (handle, resolver): (_, Resolver<T, E>) = TaskHandle::pending();

    let task = async move {
        let result = future.await;
        resolver.resolve(result);
    };

    (task, handle)
}

/// Spawns a fallible future onto the current runtime and returns its handle.
///
/// The task is pushed to the current worker's local queue when called from
/// a worker, and to the global injector otherwise. The future runs exactly
/// once; its output is memoized in the handle, so every clone of the handle
/// and every join subscribed to it observes the same outcome.
///
/// # Panics
///
/// Panics if called outside the context of a running runtime.
///
/// # Examples
///
/// ```rust
/// use awaitall::{RuntimeBuilder, task};
///
/// let runtime = RuntimeBuilder::new().worker_threads(1).build();
/// let value = runtime.block_on(async {
///     let handle = task::spawn(async { Ok::<_, ()>(5) });
///     handle.await
/// });
///
/// assert_eq!(value, Ok(5));
/// ```
pub fn spawn<F, T, E>(future: F) -> TaskHandle<T, E>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    let injector =
        current_injector().expect("spawn must be called within the context of a runtime");

    let (future, handle) = settle(future);
    let task: Arc<dyn Runnable> = Arc::new(Task::new(future, injector.clone()));

    let pushed_locally = CURRENT_WORKER_ID.with(|id| {
        let Some(id) = *id.borrow() else {
            return false;
        };

        CURRENT_LOCALS.with(|locals| match locals.borrow().as_ref() {
            Some(locals) => {
                locals[id].push(task.clone());
                true
            }
            None => false,
        })
    });

    if !pushed_locally {
        injector.push(task);
    }

    handle
}
