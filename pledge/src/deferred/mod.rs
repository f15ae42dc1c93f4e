//! The deferred value and its settlement core.
//!
//! A [`Deferred`] holds the eventual outcome of an operation. It starts
//! pending and settles exactly once, either succeeded with a value or
//! failed with a reason. Reactions attached through
//! [`then`](Deferred::then) always run on a later turn of the scheduler the
//! value was created with, never inside the call that attached them or the
//! call that settled the value.

mod chain;
mod core;
mod future;

pub(crate) mod resolve;

pub use self::core::{Outcome, State};

pub(crate) use self::core::Reaction;

use self::core::Core;
use crate::error::Error;
use crate::runtime::Handle;
use crate::value::{Function, Value};

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

/// A value that becomes known later, exactly once.
///
/// `Deferred` is a cheap handle: clones refer to the same underlying value
/// and compare equal under [`ptr_eq`](Self::ptr_eq).
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new().build();
///
/// let outcome = runtime.block_on(async {
///     Deferred::new(|succeed, _fail| {
///         succeed.call(21);
///         Ok(())
///     })
///     .then(Some(Function::unary(|v| Ok(Value::from(v.as_number().unwrap_or(0.0) * 2.0)))), None)
///     .await
/// });
///
/// assert_eq!(outcome, Ok(Value::from(42)));
/// ```
#[derive(Clone)]
pub struct Deferred {
    inner: Arc<Inner>,
}

struct Inner {
    core: Mutex<Core>,

    /// Scheduler every reaction of this value runs on.
    handle: Handle,
}

/// Capability settling a deferred value as succeeded.
#[derive(Clone)]
pub struct Succeed {
    target: Deferred,
}

/// Capability settling a deferred value as failed.
#[derive(Clone)]
pub struct Fail {
    target: Deferred,
}

/// A pending deferred value together with its settlement capabilities.
///
/// Produced by [`Deferred::with_resolvers`], for callers that settle a value
/// from outside any setup procedure.
#[derive(Debug, Clone)]
pub struct Resolvers {
    pub value: Deferred,
    pub succeed: Succeed,
    pub fail: Fail,
}

impl Deferred {
    /// Creates a deferred value on the current scheduler.
    ///
    /// `setup` runs synchronously, before `new` returns, and receives the
    /// two settlement capabilities. Returning `Err(reason)` from `setup`, or
    /// panicking in it, fails the value unless it already settled.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn new<F>(setup: F) -> Self
    where
        F: FnOnce(Succeed, Fail) -> Result<(), Value>,
    {
        Self::new_in(&Handle::current(), setup)
    }

    /// Creates a deferred value whose reactions run on `handle`.
    pub fn new_in<F>(handle: &Handle, setup: F) -> Self
    where
        F: FnOnce(Succeed, Fail) -> Result<(), Value>,
    {
        let deferred = Self::pending_in(handle.clone());

        let succeed = Succeed {
            target: deferred.clone(),
        };
        let fail = Fail {
            target: deferred.clone(),
        };

        let thrown = match panic::catch_unwind(AssertUnwindSafe(|| setup(succeed, fail))) {
            Ok(Ok(())) => None,
            Ok(Err(reason)) => Some(reason),
            Err(payload) => Some(Error::from_panic(payload).into()),
        };

        if let Some(reason) = thrown {
            deferred.reject_with(reason);
        }

        deferred
    }

    /// Creates a pending value on the current scheduler and returns it with
    /// its capabilities.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn with_resolvers() -> Resolvers {
        Self::with_resolvers_in(&Handle::current())
    }

    /// Like [`with_resolvers`](Self::with_resolvers), on an explicit
    /// scheduler.
    pub fn with_resolvers_in(handle: &Handle) -> Resolvers {
        let value = Self::pending_in(handle.clone());

        Resolvers {
            succeed: Succeed {
                target: value.clone(),
            },
            fail: Fail {
                target: value.clone(),
            },
            value,
        }
    }

    pub(crate) fn pending_in(handle: Handle) -> Self {
        Self {
            inner: Arc::new(Inner {
                core: Mutex::new(Core::default()),
                handle,
            }),
        }
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> State {
        self.inner.core.lock().state.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.core.lock().state.is_pending()
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// Returns the scheduler this value runs its reactions on.
    pub fn handle(&self) -> &Handle {
        &self.inner.handle
    }

    /// Returns `true` if both handles refer to the same deferred value.
    pub fn ptr_eq(&self, other: &Deferred) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn fulfill_with(&self, value: Value) -> bool {
        self.settle(State::Succeeded(value))
    }

    pub(crate) fn reject_with(&self, reason: Value) -> bool {
        self.settle(State::Failed(reason))
    }

    /// Settles the value and schedules every queued reaction, in
    /// registration order.
    ///
    /// Returns `false` without effect if the value already settled.
    fn settle(&self, next: State) -> bool {
        let Some(outcome) = next.outcome() else {
            return false;
        };
        let label = next.label();

        let waiters = {
            let mut core = self.inner.core.lock();
            let Some((reactions, waiters)) = core.settle(next) else {
                return false;
            };

            trace!(
                outcome = label,
                reactions = reactions.len(),
                "deferred value settled"
            );

            // Scheduled under the lock so a later `then` queues behind them.
            for reaction in reactions {
                let outcome = outcome.clone();
                self.inner
                    .handle
                    .schedule(Box::new(move || reaction.run(outcome)));
            }

            waiters
        };

        for waker in waiters {
            waker.wake();
        }

        true
    }

    /// Attaches a reaction.
    ///
    /// While pending the reaction is queued; once settled it is scheduled
    /// immediately. Either way it runs on a later turn.
    pub(crate) fn subscribe(&self, reaction: Reaction) {
        let mut core = self.inner.core.lock();

        if let Err((reaction, outcome)) = core.register(reaction) {
            self.inner
                .handle
                .schedule(Box::new(move || reaction.run(outcome)));
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.core.lock().state.label();

        f.debug_struct("Deferred")
            .field("ptr", &Arc::as_ptr(&self.inner))
            .field("state", &state)
            .finish()
    }
}

impl Succeed {
    /// Settles the target as succeeded with `value`.
    ///
    /// The value is stored as is, without unwrapping deferred values or
    /// thenables. Returns `false` if the target had already settled.
    pub fn call(&self, value: impl Into<Value>) -> bool {
        self.target.fulfill_with(value.into())
    }

    /// Returns this capability as a [`Function`] taking the value as its
    /// first argument.
    pub fn to_function(&self) -> Function {
        let succeed = self.clone();

        Function::unary(move |value| {
            succeed.call(value);
            Ok(Value::Undefined)
        })
    }
}

impl Fail {
    /// Settles the target as failed with `reason`.
    ///
    /// Returns `false` if the target had already settled.
    pub fn call(&self, reason: impl Into<Value>) -> bool {
        self.target.reject_with(reason.into())
    }

    /// Returns this capability as a [`Function`] taking the reason as its
    /// first argument.
    pub fn to_function(&self) -> Function {
        let fail = self.clone();

        Function::unary(move |reason| {
            fail.call(reason);
            Ok(Value::Undefined)
        })
    }
}

impl From<Succeed> for Function {
    fn from(succeed: Succeed) -> Self {
        succeed.to_function()
    }
}

impl From<Fail> for Function {
    fn from(fail: Fail) -> Self {
        fail.to_function()
    }
}

impl fmt::Debug for Succeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Succeed").field(&self.target).finish()
    }
}

impl fmt::Debug for Fail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Fail").field(&self.target).finish()
    }
}
