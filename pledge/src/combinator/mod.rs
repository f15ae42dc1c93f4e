//! Constructors and fan-in combinators.
//!
//! - [`Deferred::resolve`] / [`Deferred::reject`]: wrap a single value,
//! - [`Deferred::race`]: first input to settle wins,
//! - [`Deferred::all`]: every input succeeds, or the first failure,
//! - [`Deferred::all_settled`]: every input settles,
//! - [`Deferred::any`]: first success, or every failure.
//!
//! Fan-in combinators accept a [`Value::List`] only; any other input fails
//! the returned value with [`Error::NotSequence`](crate::Error::NotSequence).
//! Every element goes through [`Deferred::resolve`] first, so plain values,
//! deferred values and thenables can be mixed freely.

mod all;
mod all_settled;
mod any;
mod race;

use crate::deferred::Deferred;
use crate::deferred::resolve::resolve_into;
use crate::runtime::Handle;
use crate::value::Value;

use parking_lot::Mutex;

impl Deferred {
    /// Wraps `value` into a deferred value.
    ///
    /// A `Deferred` is returned unchanged. A thenable object is followed;
    /// anything else produces a value that succeeds with it.
    ///
    /// # Panics
    ///
    /// Panics if a new value has to be created outside the context of a
    /// runtime or a [`LocalQueue`](crate::LocalQueue).
    pub fn resolve(value: impl Into<Value>) -> Deferred {
        match value.into() {
            Value::Deferred(deferred) => deferred,
            other => {
                let deferred = Deferred::pending_in(Handle::current());
                resolve_into(&deferred, other);
                deferred
            }
        }
    }

    /// Returns a deferred value that has already failed with `reason`.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn reject(reason: impl Into<Value>) -> Deferred {
        let reason = reason.into();

        Deferred::new(move |_succeed, fail| {
            fail.call(reason);
            Ok(())
        })
    }
}

/// Fixed-size slot array filled by fan-in combinators.
struct Gather {
    slots: Mutex<Slots>,
}

struct Slots {
    values: Vec<Value>,
    remaining: usize,
}

impl Gather {
    fn new(len: usize) -> Self {
        Self {
            slots: Mutex::new(Slots {
                values: vec![Value::Undefined; len],
                remaining: len,
            }),
        }
    }

    /// Stores `value` at `index`.
    ///
    /// Returns every slot, in order, once the last one is filled.
    fn fill(&self, index: usize, value: Value) -> Option<Vec<Value>> {
        let mut slots = self.slots.lock();

        if let Some(slot) = slots.values.get_mut(index) {
            *slot = value;
        }
        slots.remaining = slots.remaining.saturating_sub(1);

        if slots.remaining == 0 {
            Some(std::mem::take(&mut slots.values))
        } else {
            None
        }
    }
}
