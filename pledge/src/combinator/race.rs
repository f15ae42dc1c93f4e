use crate::deferred::Deferred;
use crate::value::Value;

impl Deferred {
    /// Settles like whichever input settles first.
    ///
    /// The winner is the wrapped input: a thenable or nested deferred value
    /// contributes its eventual outcome, not itself.
    ///
    /// An empty list never settles. There is no first input to wait for,
    /// so the returned value stays pending forever.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn race(inputs: impl Into<Value>) -> Deferred {
        let inputs = inputs.into();

        Deferred::new(move |succeed, fail| {
            for input in inputs.into_sequence()? {
                Deferred::resolve(input)
                    .then(Some(succeed.to_function()), Some(fail.to_function()));
            }

            Ok(())
        })
    }
}
