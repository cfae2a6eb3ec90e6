//! Error types.
//!
//! A failing child surfaces its own error type unchanged, so the only error
//! this crate defines describes misuse of the handle and join contracts.

use thiserror::Error;

/// A broken usage contract.
///
/// These are programming defects rather than runtime failures. The panicking
/// accessors ([`TaskHandle::outcome`](crate::TaskHandle::outcome) and friends)
/// panic with this value's message; [`TaskHandle::try_outcome`](crate::TaskHandle::try_outcome)
/// returns it instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// The outcome of a handle was requested while it was still pending.
    #[error("outcome requested from a task handle that is still pending")]
    NotTerminal,

    /// A handle that already reached a terminal state was resolved again.
    #[error("task handle already reached a terminal state")]
    AlreadyTerminal,

    /// A join future was polled after it returned its result.
    #[error("join polled after completion")]
    PolledAfterCompletion,
}
