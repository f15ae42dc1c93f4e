use super::{Function, Value};

use std::collections::BTreeMap;
use std::fmt;

/// A host object that may take part in deferred chains.
///
/// Thenable detection is structural: the resolution procedure reads the
/// `then` member, treats a failed read as a failure, and only calls the
/// member when it is a [`Value::Function`]. Any type implementing this
/// trait can therefore interoperate with [`Deferred`](crate::Deferred)
/// without being one.
pub trait Object: Send + Sync + fmt::Debug {
    /// Reads the `then` member of this object.
    ///
    /// Returns `Ok(Value::Undefined)` when there is no such member and
    /// `Err(reason)` when reading it fails.
    fn then_member(&self) -> Result<Value, Value>;
}

/// A plain key/value object.
///
/// Its `then` member is whatever is stored under the `"then"` key, so a
/// `Record` becomes a thenable only when that field holds a function.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl Object for Record {
    fn then_member(&self) -> Result<Value, Value> {
        Ok(self.fields.get("then").cloned().unwrap_or_default())
    }
}

/// An object whose only capability is a callable `then`.
///
/// The closure receives the `(resolve, reject)` callback pair handed out by
/// the resolution procedure. Returning `Err` counts as throwing from `then`.
///
/// ```rust,ignore
/// let answer = Thenable::new(|resolve, _reject| {
///     resolve.call(&[Value::from(42)])?;
///     Ok(())
/// });
/// ```
pub struct Thenable {
    then: Function,
}

impl Thenable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Function, Function) -> Result<(), Value> + Send + Sync + 'static,
    {
        let then = Function::new(move |args| {
            f(callback_at(args, 0), callback_at(args, 1)).map(|()| Value::Undefined)
        });

        Self { then }
    }
}

/// Extracts a callback argument, falling back to a no-op.
fn callback_at(args: &[Value], index: usize) -> Function {
    match args.get(index) {
        Some(Value::Function(f)) => f.clone(),
        _ => Function::new(|_| Ok(Value::Undefined)),
    }
}

impl fmt::Debug for Thenable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thenable").field("then", &self.then).finish()
    }
}

impl Object for Thenable {
    fn then_member(&self) -> Result<Value, Value> {
        Ok(Value::Function(self.then.clone()))
    }
}
