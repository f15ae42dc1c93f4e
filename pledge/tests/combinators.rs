mod common;

use common::queue;
use pledge::{Deferred, Error, Record, State, Thenable, Value};

use std::sync::Arc;

fn assert_not_sequence(state: State, kind: &str) {
    let error = common::failed_error(state);
    match error.as_ref() {
        Error::NotSequence { found } => assert_eq!(*found, kind),
        other => panic!("expected NotSequence, got {other:?}"),
    }
}

#[test]
fn test_resolve_returns_same_deferred() {
    let queue = queue();

    let original = queue.enter(Deferred::with_resolvers).value;
    let wrapped = queue.enter(|| Deferred::resolve(original.clone()));

    assert!(wrapped.ptr_eq(&original));
}

#[test]
fn test_resolve_plain_value_succeeds() {
    let queue = queue();

    let deferred = queue.enter(|| Deferred::resolve("plain"));

    assert_eq!(deferred.state(), State::Succeeded(Value::from("plain")));
}

#[test]
fn test_reject_fails_with_reason() {
    let queue = queue();

    let deferred = queue.enter(|| Deferred::reject(Error::msg("refused")));

    let error = common::failed_error(deferred.state());
    assert_eq!(error.to_string(), "refused");
}

#[test]
fn test_reject_does_not_unwrap_deferred_reason() {
    let queue = queue();
    let reason = queue.enter(|| Deferred::resolve(1));

    let deferred = queue.enter(|| Deferred::reject(reason.clone()));
    queue.run_until_idle();

    assert_eq!(deferred.state(), State::Failed(Value::Deferred(reason)));
}

#[test]
fn test_all_keeps_input_order() {
    let queue = queue();
    let first = queue.enter(Deferred::with_resolvers);
    let second = queue.enter(Deferred::with_resolvers);

    let all = queue.enter(|| {
        Deferred::all(vec![
            Value::from(first.value.clone()),
            Value::from(second.value.clone()),
            Value::from(3),
        ])
    });

    second.succeed.call("b");
    queue.run_until_idle();
    assert!(all.is_pending());

    first.succeed.call("a");
    queue.run_until_idle();

    assert_eq!(
        all.state(),
        State::Succeeded(Value::from(vec![Value::from("a"), Value::from("b"), Value::from(3)]))
    );
}

#[test]
fn test_all_of_nothing_is_empty_list() {
    let queue = queue();

    let all = queue.enter(|| Deferred::all(Vec::<Value>::new()));
    queue.run_until_idle();

    assert_eq!(all.state(), State::Succeeded(Value::List(Vec::new())));
}

#[test]
fn test_all_fails_with_first_failure() {
    let queue = queue();
    let first = queue.enter(Deferred::with_resolvers);
    let second = queue.enter(Deferred::with_resolvers);

    let all = queue.enter(|| {
        Deferred::all(vec![
            Value::from(first.value.clone()),
            Value::from(second.value.clone()),
            Value::from(Deferred::resolve(3)),
        ])
    });

    second.fail.call("second");
    queue.run_until_idle();
    first.fail.call("first");
    queue.run_until_idle();

    assert_eq!(all.state(), State::Failed(Value::from("second")));
}

#[test]
fn test_all_rejects_non_sequence() {
    let queue = queue();

    let all = queue.enter(|| Deferred::all(5));

    assert_not_sequence(all.state(), "number");
}

#[test]
fn test_all_settled_reports_every_outcome() {
    let queue = queue();

    let settled = queue.enter(|| {
        Deferred::all_settled(vec![
            Value::from(Deferred::resolve(1)),
            Value::from(Deferred::reject("e")),
            Value::from(3),
        ])
    });
    queue.run_until_idle();

    assert_eq!(
        settled.state(),
        State::Succeeded(Value::from(vec![Value::from(1), Value::from("e"), Value::from(3)]))
    );
}

#[test]
fn test_all_settled_waits_for_every_input() {
    let queue = queue();
    let slow = queue.enter(Deferred::with_resolvers);

    let settled = queue.enter(|| {
        Deferred::all_settled(vec![
            Value::from(Deferred::reject("fast")),
            Value::from(slow.value.clone()),
        ])
    });
    queue.run_until_idle();
    assert!(settled.is_pending());

    slow.succeed.call("slow");
    queue.run_until_idle();

    assert_eq!(
        settled.state(),
        State::Succeeded(Value::from(vec![Value::from("fast"), Value::from("slow")]))
    );
}

#[test]
fn test_all_settled_of_nothing_is_empty_list() {
    let queue = queue();

    let settled = queue.enter(|| Deferred::all_settled(Vec::<Value>::new()));

    assert_eq!(settled.state(), State::Succeeded(Value::List(Vec::new())));
}

#[test]
fn test_all_settled_rejects_non_sequence() {
    let queue = queue();

    let settled = queue.enter(|| Deferred::all_settled("abc"));

    assert_not_sequence(settled.state(), "string");
}

#[test]
fn test_any_takes_first_success() {
    let queue = queue();
    let slow = queue.enter(Deferred::with_resolvers);
    let fast = queue.enter(Deferred::with_resolvers);

    let any = queue.enter(|| {
        Deferred::any(vec![
            Value::from(Deferred::reject("nope")),
            Value::from(slow.value.clone()),
            Value::from(fast.value.clone()),
        ])
    });

    fast.succeed.call("fast");
    queue.run_until_idle();
    slow.succeed.call("slow");
    queue.run_until_idle();

    assert_eq!(any.state(), State::Succeeded(Value::from("fast")));
}

#[test]
fn test_any_aggregates_failures_in_input_order() {
    let queue = queue();
    let first = queue.enter(Deferred::with_resolvers);
    let second = queue.enter(Deferred::with_resolvers);

    let any = queue.enter(|| {
        Deferred::any(vec![
            Value::from(first.value.clone()),
            Value::from(second.value.clone()),
        ])
    });

    second.fail.call("b");
    queue.run_until_idle();
    assert!(any.is_pending());

    first.fail.call("a");
    queue.run_until_idle();

    let error = common::failed_error(any.state());
    assert_eq!(error.reasons(), Some(&[Value::from("a"), Value::from("b")][..]));
    assert_eq!(error.to_string(), "all 2 inputs failed");
}

#[test]
fn test_any_of_nothing_fails_with_empty_aggregate() {
    let queue = queue();

    let any = queue.enter(|| Deferred::any(Vec::<Value>::new()));

    let error = common::failed_error(any.state());
    assert_eq!(error.reasons(), Some(&[][..]));
}

#[test]
fn test_any_rejects_non_sequence() {
    let queue = queue();

    let any = queue.enter(|| Deferred::any(Value::Null));

    assert_not_sequence(any.state(), "null");
}

#[test]
fn test_race_first_settlement_wins() {
    let queue = queue();
    let slow = queue.enter(Deferred::with_resolvers);
    let fast = queue.enter(Deferred::with_resolvers);

    let race = queue.enter(|| {
        Deferred::race(vec![
            Value::from(slow.value.clone()),
            Value::from(fast.value.clone()),
        ])
    });

    fast.fail.call("fast failure");
    queue.run_until_idle();
    slow.succeed.call("slow success");
    queue.run_until_idle();

    assert_eq!(race.state(), State::Failed(Value::from("fast failure")));
}

#[test]
fn test_race_settles_with_wrapped_value() {
    let queue = queue();
    let nine = Value::from(Arc::new(Thenable::new(|resolve, _| {
        resolve.call(&[Value::from(9)])?;
        Ok(())
    })));

    let race = queue.enter(|| Deferred::race(vec![nine]));
    queue.run_until_idle();

    assert_eq!(race.state(), State::Succeeded(Value::from(9)));
}

#[test]
fn test_race_of_nothing_stays_pending() {
    let queue = queue();

    let race = queue.enter(|| Deferred::race(Vec::<Value>::new()));
    queue.run_until_idle();

    assert!(race.is_pending());
    assert!(queue.is_empty());
}

#[test]
fn test_race_rejects_non_sequence() {
    let queue = queue();

    let race = queue.enter(|| Deferred::race(Value::from(Arc::new(Record::new()))));

    assert_not_sequence(race.state(), "object");
}

#[test]
fn test_combinators_accept_mixed_inputs() {
    let queue = queue();
    let thenable = Value::from(Arc::new(Thenable::new(|resolve, _| {
        resolve.call(&[Value::from("thenable")])?;
        Ok(())
    })));

    let all = queue.enter(|| {
        Deferred::all(vec![
            Value::from("plain"),
            Value::from(Deferred::resolve("deferred")),
            thenable,
        ])
    });
    queue.run_until_idle();

    assert_eq!(
        all.state(),
        State::Succeeded(Value::from(vec!["plain", "deferred", "thenable"]))
    );
}
