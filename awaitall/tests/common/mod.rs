#![allow(dead_code)]
//! Shared integration test helpers.
//!
//! ```ignore
//! mod common;
//! ```

use awaitall::{Runtime, RuntimeBuilder, yield_now};
use std::sync::Once;

static INIT_LOGGING: Once = Once::new();

/// Installs a trace-level subscriber writing to the test output.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(false)
            .try_init();
    });
}

/// A single-worker runtime: strictly cooperative and FIFO for scheduled
/// continuations, so completion order is fully controlled by the test.
pub fn single_worker() -> Runtime {
    init_test_logging();

    RuntimeBuilder::new()
        .worker_threads(1)
        .thread_name("test-worker")
        .build()
}

/// Yields enough times for every continuation scheduled so far to run.
pub async fn settle() {
    for _ in 0..4 {
        yield_now().await;
    }
}
