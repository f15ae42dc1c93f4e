#![allow(dead_code)]

use pledge::{Error, Function, LocalQueue, State, Value};

use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

/// Installs a test-friendly tracing subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh local queue with tracing installed.
pub fn queue() -> LocalQueue {
    init_tracing();
    LocalQueue::new()
}

/// A handler recording its first argument under `label` and passing it on.
pub fn recording(log: &Arc<Mutex<Vec<String>>>, label: &str) -> Function {
    let log = log.clone();
    let label = label.to_string();

    Function::unary(move |value| {
        log.lock().unwrap().push(format!("{label}:{value:?}"));
        Ok(value)
    })
}

/// Extracts the engine error of a failed state.
pub fn failed_error(state: State) -> Arc<Error> {
    match state {
        State::Failed(Value::Error(error)) => error,
        other => panic!("expected an engine error, got {other:?}"),
    }
}
