//! Tasks and task handles.
//!
//! A [`TaskHandle`] is the capability the join combinators consume: it can
//! be observed, subscribed to and read once terminal, and it is shared by
//! cloning. Handles are settled either by a spawned future ([`spawn`]) or
//! explicitly through a [`Resolver`].

pub(crate) mod handle;
pub(crate) mod resolver;
pub(crate) mod state;
pub(crate) mod waker;

pub(crate) use self::core::{Runnable, Task, dispatch, settle};

pub mod core;

pub use self::core::{Continuation, spawn};
pub use handle::{Completion, Status, TaskHandle};
pub use resolver::Resolver;
