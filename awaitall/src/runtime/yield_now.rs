use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Future returned by [`yield_now`].
struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }

        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// Yields execution back to the scheduler once.
///
/// The current task is requeued behind everything already scheduled, which
/// includes handle continuations fired before the yield. On a single worker
/// this lets those continuations run before the task resumes.
///
/// # Examples
///
/// ```rust
/// use awaitall::{RuntimeBuilder, yield_now};
///
/// let runtime = RuntimeBuilder::new().worker_threads(1).build();
/// runtime.block_on(async {
///     yield_now().await;
/// });
/// ```
pub async fn yield_now() {
    YieldNow { yielded: false }.await
}
