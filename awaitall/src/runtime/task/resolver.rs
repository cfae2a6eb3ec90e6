use super::handle::HandleCore;

use std::fmt;
use std::sync::Arc;

/// The write side of a pending [`TaskHandle`](super::TaskHandle).
///
/// A resolver settles its handle exactly once; every method that settles it
/// consumes the resolver. Dropping a resolver without settling leaves the
/// handle pending forever, and every join over it pending with it.
pub struct Resolver<T, E> {
    core: Option<Arc<HandleCore<T, E>>>,
}

impl<T, E> Resolver<T, E> {
    pub(crate) fn new(core: Arc<HandleCore<T, E>>) -> Self {
        Self { core: Some(core) }
    }

    /// Settles the handle with `result`.
    ///
    /// Continuations subscribed to the handle are dispatched to the current
    /// runtime, or run inline when called outside of one.
    pub fn resolve(mut self, result: Result<T, E>) {
        let Some(core) = self.core.take() else {
            return;
        };

        if let Err(violation) = core.complete(result) {
            panic!("{violation}");
        }
    }

    /// Settles the handle with a success value.
    pub fn succeed(self, value: T) {
        self.resolve(Ok(value));
    }

    /// Settles the handle with a failure.
    pub fn fail(self, error: E) {
        self.resolve(Err(error));
    }
}

impl<T, E> Drop for Resolver<T, E> {
    fn drop(&mut self) {
        if self.core.is_some() {
            tracing::warn!("resolver dropped without settling; its task handle stays pending");
        }
    }
}

impl<T, E> fmt::Debug for Resolver<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("settled", &self.core.is_none())
            .finish()
    }
}
