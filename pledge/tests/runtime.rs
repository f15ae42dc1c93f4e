mod common;

use pledge::{Deferred, Error, Function, Handle, Runtime, RuntimeBuilder, Value};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

fn runtime() -> Runtime {
    common::init_tracing();
    RuntimeBuilder::new().build()
}

#[test]
fn test_block_on_awaits_chain() {
    let rt = runtime();

    let outcome = rt.block_on(async {
        Deferred::resolve(20)
            .then(
                Some(Function::unary(|v| Ok(Value::from(v.as_number().unwrap() + 22.0)))),
                None,
            )
            .await
    });

    assert_eq!(outcome, Ok(Value::from(42)));
}

#[test]
fn test_await_failure_yields_err() {
    let rt = runtime();

    let outcome = rt.block_on(async { Deferred::reject("boom").await });

    assert_eq!(outcome, Err(Value::from("boom")));
}

#[test]
fn test_settle_from_foreign_thread() {
    let rt = runtime();

    let outcome = rt.block_on(async {
        let resolvers = Deferred::with_resolvers();
        let succeed = resolvers.succeed.clone();

        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            succeed.call("from another thread");
        });

        resolvers.value.await
    });

    assert_eq!(outcome, Ok(Value::from("from another thread")));
}

#[test]
fn test_reactions_keep_order_on_event_loop() {
    let rt = runtime();
    let log = Arc::new(Mutex::new(Vec::new()));

    rt.block_on(async {
        let resolvers = Deferred::with_resolvers();

        let derived: Vec<Value> = (0..50)
            .map(|i| {
                let log = log.clone();
                Value::from(resolvers.value.then(
                    Some(Function::unary(move |value| {
                        log.lock().unwrap().push(i);
                        Ok(value)
                    })),
                    None,
                ))
            })
            .collect();

        let succeed = resolvers.succeed.clone();
        thread::spawn(move || {
            succeed.call(1);
        });

        Deferred::all(derived).await
    })
    .unwrap();

    assert_eq!(*log.lock().unwrap(), (0..50).collect::<Vec<_>>());
}

#[test]
fn test_awaiting_twice_yields_same_outcome() {
    let rt = runtime();

    rt.block_on(async {
        let deferred = Deferred::resolve("once");

        assert_eq!(deferred.clone().await, Ok(Value::from("once")));
        assert_eq!(deferred.await, Ok(Value::from("once")));
    });
}

#[test]
fn test_race_of_nothing_never_settles() {
    let rt = runtime();

    let outcome = rt.block_on_timeout(Duration::from_millis(50), async {
        Deferred::race(Vec::<Value>::new()).await
    });

    assert!(outcome.is_none());
}

#[test]
fn test_block_on_timeout_completes_in_time() {
    let rt = runtime();

    let outcome = rt.block_on_timeout(Duration::from_secs(5), async { Deferred::resolve(1).await });

    assert_eq!(outcome, Some(Ok(Value::from(1))));
}

#[test]
fn test_panicking_job_does_not_stop_event_loop() {
    let rt = runtime();

    rt.spawn(|| panic!("job exploded"));

    let outcome = rt.block_on(async {
        Deferred::resolve(1)
            .then(Some(Function::unary(|_| Ok(Value::from("still running")))), None)
            .await
    });

    assert_eq!(outcome, Ok(Value::from("still running")));
}

#[test]
fn test_reactions_run_on_named_event_loop() {
    common::init_tracing();
    let rt = RuntimeBuilder::new()
        .thread_name("reactions")
        .park_interval(Duration::from_millis(5))
        .build();

    let name = rt.block_on(async {
        Deferred::resolve(())
            .then(
                Some(Function::unary(|_| {
                    Ok(Value::from(thread::current().name().map(str::to_string)))
                })),
                None,
            )
            .await
    });

    assert_eq!(name, Ok(Value::from("reactions")));
}

#[test]
fn test_current_handle_follows_context() {
    let rt = runtime();

    assert!(matches!(Handle::try_current(), Err(Error::NoRuntime)));

    let current = rt.enter(Handle::try_current).unwrap();
    assert!(current.ptr_eq(rt.handle()));

    assert!(Handle::try_current().is_err());
}

#[test]
fn test_values_bound_to_explicit_handle() {
    let rt = runtime();
    let resolvers = Deferred::with_resolvers_in(rt.handle());

    assert!(resolvers.value.handle().ptr_eq(rt.handle()));

    resolvers.succeed.call(7);

    assert_eq!(rt.block_on(resolvers.value), Ok(Value::from(7)));
}

#[test]
#[should_panic(expected = "must be called within the context of a runtime")]
fn test_new_outside_runtime_panics() {
    Deferred::new(|_, _| Ok(()));
}

#[test]
#[should_panic(expected = "park_interval must be > 0")]
fn test_zero_park_interval_panics() {
    RuntimeBuilder::new().park_interval(Duration::ZERO);
}

#[test]
fn test_jobs_after_shutdown_are_dropped() {
    let rt = runtime();
    let handle = rt.handle().clone();
    drop(rt);

    let ran = Arc::new(AtomicBool::new(false));
    let flag = ran.clone();
    handle.spawn(move || flag.store(true, Ordering::SeqCst));

    thread::sleep(Duration::from_millis(20));

    assert!(!ran.load(Ordering::SeqCst));
}
