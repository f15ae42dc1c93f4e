use super::resolve::resolve_into;
use super::{Deferred, Reaction};
use crate::error::Error;
use crate::value::{Function, Value};

use std::panic::{self, AssertUnwindSafe};

impl Deferred {
    /// Derives a new deferred value from this one.
    ///
    /// Once this value settles, the matching handler runs on a later turn
    /// with the success value or failure reason. What it returns settles
    /// the derived value through the resolution procedure, so returning a
    /// deferred value or a thenable makes the derived value follow it.
    /// Returning `Err` (or panicking) fails the derived value.
    ///
    /// A missing success handler passes the value through unchanged and a
    /// missing failure handler re-raises the reason.
    pub fn then(&self, on_success: Option<Function>, on_failure: Option<Function>) -> Deferred {
        let derived = Deferred::pending_in(self.handle().clone());
        let target = derived.clone();

        self.subscribe(Reaction::new(move |outcome| {
            let produced = match outcome {
                Ok(value) => match &on_success {
                    Some(handler) => invoke(handler, &[value]),
                    None => Ok(value),
                },
                Err(reason) => match &on_failure {
                    Some(handler) => invoke(handler, &[reason]),
                    None => Err(reason),
                },
            };

            match produced {
                Ok(value) => resolve_into(&target, value),
                Err(reason) => {
                    target.reject_with(reason);
                }
            }
        }));

        derived
    }

    /// Shorthand for `then(None, on_failure)`.
    pub fn catch(&self, on_failure: Option<Function>) -> Deferred {
        self.then(None, on_failure)
    }

    /// Runs `on_settled` once this value settles, whatever the outcome.
    ///
    /// The handler receives no arguments and its return value is ignored:
    /// the derived value carries this value's outcome. If the handler fails,
    /// the derived value fails with that error instead.
    pub fn finally(&self, on_settled: Option<Function>) -> Deferred {
        let Some(handler) = on_settled else {
            return self.then(None, None);
        };

        let on_success = {
            let handler = handler.clone();

            Function::unary(move |value| {
                invoke(&handler, &[])?;
                Ok(value)
            })
        };

        let on_failure = Function::unary(move |reason| {
            invoke(&handler, &[])?;
            Err(reason)
        });

        self.then(Some(on_success), Some(on_failure))
    }
}

/// Calls a user handler, turning a panic into a failure.
fn invoke(handler: &Function, args: &[Value]) -> Result<Value, Value> {
    panic::catch_unwind(AssertUnwindSafe(|| handler.call(args)))
        .unwrap_or_else(|payload| Err(Error::from_panic(payload).into()))
}
