use super::Value;

use std::fmt;
use std::sync::Arc;

type Callable = dyn Fn(&[Value]) -> Result<Value, Value> + Send + Sync;

/// A shared, thread-safe callable.
///
/// Returning `Err(reason)` is how a function "throws": wherever the engine
/// invokes a `Function`, an `Err` is routed into the failure channel of the
/// deferred value being settled.
#[derive(Clone)]
pub struct Function {
    inner: Arc<Callable>,
}

impl Function {
    /// Wraps a closure taking the full argument list.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Wraps a closure that only looks at its first argument.
    ///
    /// A missing argument is passed as [`Value::Undefined`].
    pub fn unary<F>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, Value> + Send + Sync + 'static,
    {
        Self::new(move |args| f(args.first().cloned().unwrap_or_default()))
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> Result<Value, Value> {
        (self.inner)(args)
    }

    /// Returns `true` if both handles point to the same callable.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.inner), Arc::as_ptr(&other.inner))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({:p})", Arc::as_ptr(&self.inner))
    }
}
