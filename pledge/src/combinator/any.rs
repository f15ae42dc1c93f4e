use super::Gather;
use crate::deferred::Deferred;
use crate::error::Error;
use crate::value::{Function, Value};

use std::sync::Arc;

impl Deferred {
    /// Succeeds with the value of the first input to succeed.
    ///
    /// If every input fails, fails with [`Error::Aggregate`] carrying the
    /// failure reasons in input order. An empty list fails right away with
    /// an aggregate error carrying no reasons.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn any(inputs: impl Into<Value>) -> Deferred {
        let inputs = inputs.into();

        Deferred::new(move |succeed, fail| {
            let inputs = inputs.into_sequence()?;

            if inputs.is_empty() {
                fail.call(Error::Aggregate {
                    reasons: Vec::new(),
                });
                return Ok(());
            }

            let gather = Arc::new(Gather::new(inputs.len()));

            for (index, input) in inputs.into_iter().enumerate() {
                let on_failure = {
                    let gather = gather.clone();
                    let fail = fail.clone();

                    Function::unary(move |reason| {
                        if let Some(reasons) = gather.fill(index, reason) {
                            fail.call(Error::Aggregate { reasons });
                        }
                        Ok(Value::Undefined)
                    })
                };

                Deferred::resolve(input).then(Some(succeed.to_function()), Some(on_failure));
            }

            Ok(())
        })
    }
}
