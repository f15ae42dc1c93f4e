//! The resolution procedure.
//!
//! Decides how a value produced by a reaction settles the derived value it
//! belongs to:
//!
//! 1. the derived value itself: fail with [`Error::ChainCycle`],
//! 2. another [`Deferred`]: adopt its eventual outcome,
//! 3. an [`Object`](crate::Object) whose `then` member is a function: call
//!    it once with a guarded `(resolve, reject)` pair,
//! 4. anything else: succeed with it as is.
//!
//! Re-entry is iterative. A thenable that resolves synchronously, from
//! inside its own `then`, parks the value in its [`Attempt`]; the loop picks
//! it up once `then` returns instead of recursing.

use super::{Deferred, Reaction};
use crate::error::Error;
use crate::value::{Function, Value};

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::warn;

/// What to do with a produced value.
enum Step {
    Cycle,
    Adopt(Deferred),
    CallThen(Function),
    ReadFailed(Value),
    Settle,
}

/// Settles `target` from `produced`, unwrapping deferred values and
/// thenables.
pub(crate) fn resolve_into(target: &Deferred, mut produced: Value) {
    loop {
        match classify(&produced, target) {
            Step::Cycle => {
                warn!("deferred value resolved with itself");
                target.reject_with(Error::ChainCycle.into());
                return;
            }
            Step::Adopt(source) => {
                adopt(target, &source);
                return;
            }
            Step::ReadFailed(reason) => {
                target.reject_with(reason);
                return;
            }
            Step::CallThen(then) => match call_then(target, &then) {
                Some(next) => produced = next,
                None => return,
            },
            Step::Settle => {
                target.fulfill_with(produced);
                return;
            }
        }
    }
}

fn classify(produced: &Value, target: &Deferred) -> Step {
    match produced {
        Value::Deferred(source) if source.ptr_eq(target) => Step::Cycle,
        Value::Deferred(source) => Step::Adopt(source.clone()),
        Value::Object(object) => {
            let member = panic::catch_unwind(AssertUnwindSafe(|| object.then_member()))
                .unwrap_or_else(|payload| Err(Error::from_panic(payload).into()));

            match member {
                Err(reason) => Step::ReadFailed(reason),
                Ok(Value::Function(then)) => Step::CallThen(then),
                Ok(_) => Step::Settle,
            }
        }
        _ => Step::Settle,
    }
}

/// Makes `target` follow the outcome of `source`.
fn adopt(target: &Deferred, source: &Deferred) {
    let target = target.clone();

    source.subscribe(Reaction::new(move |outcome| match outcome {
        Ok(value) => resolve_into(&target, value),
        Err(reason) => {
            target.reject_with(reason);
        }
    }));
}

/// Calls a thenable's `then` member once.
///
/// Returns the value to keep resolving with if `resolve` was called before
/// `then` returned.
fn call_then(target: &Deferred, then: &Function) -> Option<Value> {
    let attempt = Attempt::new();

    let resolve = {
        let attempt = attempt.clone();
        let target = target.clone();

        Function::unary(move |value| {
            if attempt.claim() {
                attempt.deliver(&target, value);
            }
            Ok(Value::Undefined)
        })
    };

    let reject = {
        let attempt = attempt.clone();
        let target = target.clone();

        Function::unary(move |reason| {
            if attempt.claim() {
                target.reject_with(reason);
            }
            Ok(Value::Undefined)
        })
    };

    let args = [Value::Function(resolve), Value::Function(reject)];
    let thrown = match panic::catch_unwind(AssertUnwindSafe(|| then.call(&args))) {
        Ok(Ok(_)) => None,
        Ok(Err(reason)) => Some(reason),
        Err(payload) => Some(Error::from_panic(payload).into()),
    };

    // A throw after resolve or reject already ran is ignored.
    if let Some(reason) = thrown {
        if attempt.claim() {
            target.reject_with(reason);
        }
    }

    attempt.finish()
}

/// Bookkeeping for one call of a thenable's `then`.
struct Attempt {
    /// One-shot latch shared by `resolve`, `reject` and the throw path.
    called: AtomicBool,

    phase: Mutex<Phase>,
}

enum Phase {
    /// `then` has not returned yet.
    Calling,
    /// `resolve` ran during the call; the loop continues with this value.
    Parked(Value),
    /// `then` returned; later resolutions re-enter directly.
    Returned,
}

impl Attempt {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            called: AtomicBool::new(false),
            phase: Mutex::new(Phase::Calling),
        })
    }

    /// Closes the latch. Only the first caller gets `true`.
    fn claim(&self) -> bool {
        self.called
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn deliver(&self, target: &Deferred, value: Value) {
        let mut phase = self.phase.lock();

        if matches!(*phase, Phase::Calling) {
            *phase = Phase::Parked(value);
            return;
        }

        drop(phase);
        resolve_into(target, value);
    }

    fn finish(&self) -> Option<Value> {
        match std::mem::replace(&mut *self.phase.lock(), Phase::Returned) {
            Phase::Parked(value) => Some(value),
            Phase::Calling | Phase::Returned => None,
        }
    }
}
