mod common;

use awaitall::{TaskHandle, join_map, task};
use common::{settle, single_worker};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, Waker};

#[test]
fn test_map_failure_is_propagated_verbatim() {
    let rt = single_worker();

    let result = rt.block_on(async {
        join_map([
            ("a", TaskHandle::<i32, &str>::failed("E")),
            ("b", TaskHandle::succeeded(5)),
        ])
        .await
    });

    assert_eq!(result, Err("E"));
}

#[test]
fn test_map_keeps_insertion_order_and_keys() {
    let rt = single_worker();

    let result = rt.block_on(async {
        let (late, resolve_late) = TaskHandle::<u64, ()>::pending();
        let joined = join_map([
            ("zeta", late),
            ("alpha", TaskHandle::succeeded(1)),
            ("mid", TaskHandle::succeeded(2)),
        ]);

        settle().await;
        resolve_late.succeed(26);
        joined.await
    });

    let pairs: Vec<_> = result.unwrap().into_iter().collect();
    assert_eq!(pairs, vec![("zeta", 26), ("alpha", 1), ("mid", 2)]);
}

#[test]
fn test_map_reports_first_failure_in_insertion_order() {
    let rt = single_worker();

    let result = rt.block_on(async {
        let (a, resolve_a) = TaskHandle::<i32, &str>::pending();
        let (b, resolve_b) = TaskHandle::pending();
        let joined = join_map([("a", a), ("b", b)]);

        // `b` fails first in time; `a` is still the one reported.
        resolve_b.fail("E2");
        settle().await;
        resolve_a.fail("E1");

        joined.await
    });

    assert_eq!(result, Err("E1"));
}

#[test]
fn test_map_accepts_any_keyed_collection() {
    let rt = single_worker();

    let result = rt.block_on(async {
        let handles: BTreeMap<u8, TaskHandle<char, ()>> = [
            (3, TaskHandle::succeeded('c')),
            (1, task::spawn(async { Ok('a') })),
            (2, TaskHandle::succeeded('b')),
        ]
        .into_iter()
        .collect();

        join_map(handles).await
    });

    let values: Vec<_> = result.unwrap().into_values().collect();
    assert_eq!(values, vec!['a', 'b', 'c']);
}

#[test]
fn test_empty_map_is_ready_on_first_poll() {
    let mut joined = join_map(Vec::<(String, TaskHandle<i32, ()>)>::new());
    let mut cx = Context::from_waker(Waker::noop());

    match Pin::new(&mut joined).poll(&mut cx) {
        Poll::Ready(Ok(map)) => assert!(map.is_empty()),
        other => panic!("expected an empty map, got {other:?}"),
    }
}
