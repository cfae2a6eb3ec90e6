mod common;

use awaitall::{Status, TaskHandle, join_map, join_sequence, task};
use common::{settle, single_worker};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_shared_handle_runs_its_task_once() {
    let rt = single_worker();
    let runs = Arc::new(AtomicUsize::new(0));
    let counted = runs.clone();

    let (first, second) = rt.block_on(async move {
        let shared = task::spawn(async move {
            counted.fetch_add(1, Ordering::SeqCst);
            settle().await;
            Ok::<u32, String>(7)
        });

        let first = join_sequence(vec![shared.clone(), TaskHandle::succeeded(1)]);
        let second = join_map([("x", shared.clone())]);

        (first.await, second.await.map(|map| map["x"]))
    });

    assert_eq!(first, Ok(vec![7, 1]));
    assert_eq!(second, Ok(7));
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_shared_failure_reaches_every_join() {
    let rt = single_worker();

    let (first, second) = rt.block_on(async {
        let (shared, resolver) = TaskHandle::<i32, String>::pending();

        let first = task::spawn(join_sequence([shared.clone()]));
        let second = task::spawn(join_sequence([TaskHandle::succeeded(0), shared]));

        settle().await;
        resolver.fail(String::from("shared failure"));

        (first.await, second.await)
    });

    assert_eq!(first, Err(String::from("shared failure")));
    assert_eq!(second, Err(String::from("shared failure")));
}

#[test]
fn test_awaiting_a_handle_from_two_tasks() {
    let rt = single_worker();

    let outcomes = rt.block_on(async {
        let (handle, resolver) = TaskHandle::<&str, ()>::pending();

        let readers: Vec<_> = (0..2)
            .map(|_| {
                let handle = handle.clone();
                task::spawn(async move { handle.await })
            })
            .collect();

        settle().await;
        assert_eq!(handle.status(), Status::Pending);
        resolver.succeed("done");

        join_sequence(readers).await
    });

    assert_eq!(outcomes, Ok(vec!["done", "done"]));
}

#[test]
fn test_resolver_outside_runtime_settles_inline() {
    let (handle, resolver) = TaskHandle::<u8, ()>::pending();
    let fired = Arc::new(AtomicUsize::new(0));

    let observed = fired.clone();
    handle.subscribe(move || {
        observed.fetch_add(1, Ordering::SeqCst);
    });

    resolver.succeed(9);

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(handle.outcome(), Ok(9));
}

#[test]
fn test_panicking_continuation_does_not_skip_later_subscribers() {
    let rt = single_worker();
    let fired = Arc::new(AtomicUsize::new(0));

    let (handle, resolver) = TaskHandle::<(), ()>::pending();
    handle.subscribe(|| panic!("first subscriber"));
    let counter = fired.clone();
    handle.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    rt.block_on(async move {
        resolver.succeed(());
        settle().await;
    });

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(rt.block_on(async { 2 }), 2);
}

#[test]
fn test_panicking_continuation_outside_runtime_does_not_skip_later_subscribers() {
    let fired = Arc::new(AtomicUsize::new(0));

    let (handle, resolver) = TaskHandle::<(), ()>::pending();
    handle.subscribe(|| panic!("first subscriber"));
    let counter = fired.clone();
    handle.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    resolver.succeed(());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(handle.status(), Status::Succeeded);
}
