mod common;

use awaitall::{RuntimeBuilder, TaskHandle, join_map, join_sequence, task};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;

#[test]
fn test_single_worker_thread() {
    let rt = RuntimeBuilder::new().worker_threads(1).build();

    let result = rt.block_on(async { 42 });
    assert_eq!(result, 42);
}

#[test]
#[should_panic(expected = "worker_threads must be > 0")]
fn test_zero_worker_threads_rejected() {
    let _ = RuntimeBuilder::new().worker_threads(0);
}

#[test]
fn test_runtime_spawn_from_outside() {
    let rt = RuntimeBuilder::new().worker_threads(2).build();

    let handle = rt.spawn(async { Ok::<_, ()>("outside") });
    assert_eq!(rt.block_on(handle), Ok("outside"));
}

#[test]
fn test_worker_thread_names() {
    let rt = RuntimeBuilder::new()
        .worker_threads(2)
        .thread_name("joiner")
        .build();

    let name = rt.block_on(async { thread::current().name().map(String::from) });
    let name = name.expect("worker threads are named");

    assert!(name.starts_with("joiner-"), "unexpected name {name}");
}

#[test]
fn test_join_across_workers_keeps_order() {
    common::init_test_logging();
    let rt = RuntimeBuilder::new().worker_threads(4).build();

    let result = rt.block_on(async {
        let handles: Vec<_> = (0..100u64)
            .map(|i| task::spawn(async move { Ok::<_, String>(i * 2) }))
            .collect();

        join_sequence(handles).await
    });

    let expected: Vec<u64> = (0..100).map(|i| i * 2).collect();
    assert_eq!(result, Ok(expected));
}

#[test]
fn test_join_runs_on_multiple_threads() {
    let rt = RuntimeBuilder::new().worker_threads(8).build();
    let threads = Arc::new(Mutex::new(HashSet::new()));
    let seen = threads.clone();

    let result = rt.block_on(async move {
        let handles = (0..64).map(|i| {
            let seen = seen.clone();
            let handle = task::spawn(async move {
                seen.lock().unwrap().insert(thread::current().id());
                Ok::<_, ()>(i)
            });
            (i, handle)
        });

        join_map(handles).await
    });

    let map = result.unwrap();
    assert_eq!(map.len(), 64);
    assert!(map.iter().enumerate().all(|(pos, (k, v))| pos == *k && k == v));
    assert!(!threads.lock().unwrap().is_empty());
}

#[test]
fn test_nested_joins() {
    let rt = RuntimeBuilder::new().worker_threads(4).build();

    let result = rt.block_on(async {
        let inner: Vec<TaskHandle<Vec<u32>, String>> = (0..4u32)
            .map(|row| {
                task::spawn(async move {
                    let cells: Vec<_> = (0..3u32)
                        .map(|col| task::spawn(async move { Ok::<_, String>(row * 10 + col) }))
                        .collect();
                    join_sequence(cells).await
                })
            })
            .collect();

        join_sequence(inner).await
    });

    assert_eq!(
        result,
        Ok(vec![
            vec![0, 1, 2],
            vec![10, 11, 12],
            vec![20, 21, 22],
            vec![30, 31, 32],
        ])
    );
}

fn explode() -> Result<u8, ()> {
    panic!("task blew up")
}

#[test]
fn test_panicking_task_keeps_single_worker_alive() {
    let rt = common::single_worker();

    let doomed = rt.spawn(async { explode() });
    let survivor = rt.spawn(async { Ok::<_, ()>(9) });

    assert_eq!(rt.block_on(async { 1 }), 1);
    assert_eq!(rt.block_on(survivor), Ok(9));
    assert_eq!(doomed.status(), awaitall::Status::Pending);
}
