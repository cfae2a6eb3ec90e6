use crate::runtime::work_stealing::injector::InjectorHandle;
use crate::runtime::work_stealing::queue::LocalQueue;

use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
    /// Handle to the injector of the runtime this thread is working for.
    ///
    /// Its presence is what "inside the runtime" means: continuations fired
    /// while it is set are scheduled instead of run inline.
    pub(crate) static CURRENT_INJECTOR: RefCell<Option<InjectorHandle>> =
        const { RefCell::new(None) };

    /// Identifier of the current worker thread, if this thread is a worker.
    pub(crate) static CURRENT_WORKER_ID: RefCell<Option<usize>> =
        const { RefCell::new(None) };

    /// All local worker queues, indexed by worker id.
    pub(crate) static CURRENT_LOCALS: RefCell<Option<Arc<Vec<Arc<LocalQueue>>>>> =
        const { RefCell::new(None) };
}

/// Runs `f` with the runtime context installed on the current thread.
///
/// The previous context is restored afterwards, so nested runtimes on the
/// same thread do not leak their queues into each other.
pub(crate) fn enter_context<R>(
    injector: InjectorHandle,
    locals: Arc<Vec<Arc<LocalQueue>>>,
    f: impl FnOnce() -> R,
) -> R {
    let prev_injector = CURRENT_INJECTOR.with(|cell| cell.replace(Some(injector)));
    let prev_locals = CURRENT_LOCALS.with(|cell| cell.replace(Some(locals)));

    let out = f();

    CURRENT_LOCALS.with(|cell| cell.replace(prev_locals));
    CURRENT_INJECTOR.with(|cell| cell.replace(prev_injector));

    out
}

/// Returns the injector of the runtime the current thread runs in, if any.
pub(crate) fn current_injector() -> Option<InjectorHandle> {
    CURRENT_INJECTOR.with(|cell| cell.borrow().clone())
}
