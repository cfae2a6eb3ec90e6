use std::sync::Mutex;
use std::task::Waker;

/// A single parked waker.
///
/// The owner of a pending future stores its latest waker with
/// [`register`](Self::register); whoever completes the awaited event calls
/// [`wake`](Self::wake), which takes the waker out so it fires at most once
/// per registration.
pub(crate) struct WakerSlot {
    waker: Mutex<Option<Waker>>,
}

impl WakerSlot {
    pub(crate) fn new() -> Self {
        Self {
            waker: Mutex::new(None),
        }
    }

    /// Stores `waker`, replacing any previous one unless both wake the same task.
    pub(crate) fn register(&self, waker: &Waker) {
        let mut slot = self.waker.lock().unwrap();

        match slot.as_ref() {
            Some(current) if current.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        }
    }

    /// Wakes and clears the registered waker, if any.
    pub(crate) fn wake(&self) {
        let waker = self.waker.lock().unwrap().take();

        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WakerSlot;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Wake, Waker};

    struct Counter(AtomicUsize);

    impl Wake for Counter {
        fn wake(self: Arc<Self>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn wake_fires_once_per_registration() {
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let waker = Waker::from(counter.clone());
        let slot = WakerSlot::new();

        slot.wake();
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);

        slot.register(&waker);
        slot.register(&waker);
        slot.wake();
        slot.wake();
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }
}
