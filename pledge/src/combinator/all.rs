use super::Gather;
use crate::deferred::Deferred;
use crate::value::{Function, Value};

use std::sync::Arc;

impl Deferred {
    /// Succeeds with the list of every input's value, in input order, once
    /// all of them succeeded.
    ///
    /// Fails with the first failure reason observed. The remaining inputs
    /// keep running, but their outcomes no longer matter. An empty list
    /// succeeds with an empty list.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn all(inputs: impl Into<Value>) -> Deferred {
        let inputs = inputs.into();

        Deferred::new(move |succeed, fail| {
            let inputs = inputs.into_sequence()?;

            if inputs.is_empty() {
                succeed.call(Value::List(Vec::new()));
                return Ok(());
            }

            let gather = Arc::new(Gather::new(inputs.len()));

            for (index, input) in inputs.into_iter().enumerate() {
                let on_success = {
                    let gather = gather.clone();
                    let succeed = succeed.clone();

                    Function::unary(move |value| {
                        if let Some(values) = gather.fill(index, value) {
                            succeed.call(Value::List(values));
                        }
                        Ok(Value::Undefined)
                    })
                };

                Deferred::resolve(input).then(Some(on_success), Some(fail.to_function()));
            }

            Ok(())
        })
    }
}
