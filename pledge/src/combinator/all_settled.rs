use super::Gather;
use crate::deferred::Deferred;
use crate::value::{Function, Value};

use std::sync::Arc;

impl Deferred {
    /// Succeeds once every input has settled.
    ///
    /// Each slot of the resulting list holds the input's success value or
    /// its failure reason, in input order. The returned value only fails
    /// when `inputs` is not a list. An empty list succeeds with an empty
    /// list.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn all_settled(inputs: impl Into<Value>) -> Deferred {
        let inputs = inputs.into();

        Deferred::new(move |succeed, _fail| {
            let inputs = inputs.into_sequence()?;

            if inputs.is_empty() {
                succeed.call(Value::List(Vec::new()));
                return Ok(());
            }

            let gather = Arc::new(Gather::new(inputs.len()));

            for (index, input) in inputs.into_iter().enumerate() {
                let record = {
                    let gather = gather.clone();
                    let succeed = succeed.clone();

                    Function::unary(move |settled| {
                        if let Some(values) = gather.fill(index, settled) {
                            succeed.call(Value::List(values));
                        }
                        Ok(Value::Undefined)
                    })
                };

                Deferred::resolve(input).then(Some(record.clone()), Some(record));
            }

            Ok(())
        })
    }
}
