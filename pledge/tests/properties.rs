mod common;

use common::queue;
use pledge::{Deferred, State, Value};

use proptest::collection::vec;
use proptest::prelude::*;

proptest! {
    #[test]
    fn all_of_plain_values_is_identity(values in vec(any::<i32>(), 0..32)) {
        let queue = queue();

        let all = queue.enter(|| Deferred::all(values.clone()));
        queue.run_until_idle();

        prop_assert_eq!(all.state(), State::Succeeded(Value::from(values)));
    }

    #[test]
    fn then_without_handlers_is_transparent(succeeds in any::<bool>(), n in any::<i32>()) {
        let queue = queue();

        let source = queue.enter(|| {
            if succeeds { Deferred::resolve(n) } else { Deferred::reject(n) }
        });
        let derived = source.then(None, None);
        queue.run_until_idle();

        prop_assert_eq!(derived.state(), source.state());
    }

    #[test]
    fn first_settlement_wins(calls in vec((any::<bool>(), any::<i32>()), 1..16)) {
        let queue = queue();
        let resolvers = queue.enter(Deferred::with_resolvers);

        let accepted: Vec<bool> = calls
            .iter()
            .map(|&(succeeds, n)| {
                if succeeds { resolvers.succeed.call(n) } else { resolvers.fail.call(n) }
            })
            .collect();

        let (succeeds, n) = calls[0];
        let expected = if succeeds {
            State::Succeeded(Value::from(n))
        } else {
            State::Failed(Value::from(n))
        };

        prop_assert_eq!(resolvers.value.state(), expected);
        prop_assert!(accepted[0]);
        prop_assert!(accepted[1..].iter().all(|accepted| !accepted));
    }

    #[test]
    fn all_settled_mirrors_outcomes(outcomes in vec((any::<bool>(), any::<i32>()), 0..16)) {
        let queue = queue();

        let settled = queue.enter(|| {
            let inputs: Vec<Value> = outcomes
                .iter()
                .map(|&(succeeds, n)| {
                    Value::from(if succeeds { Deferred::resolve(n) } else { Deferred::reject(n) })
                })
                .collect();
            Deferred::all_settled(inputs)
        });
        queue.run_until_idle();

        let expected: Vec<Value> = outcomes.iter().map(|&(_, n)| Value::from(n)).collect();
        prop_assert_eq!(settled.state(), State::Succeeded(Value::from(expected)));
    }
}
