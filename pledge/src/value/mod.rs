//! Dynamically typed values flowing through deferred chains.
//!
//! A reaction may hand back a plain value, another deferred value, or a
//! foreign object that merely *looks* like one. [`Value`] keeps all of
//! these in one type so the resolution procedure can tell them apart at
//! runtime.

mod function;
mod object;

pub use function::Function;
pub use object::{Object, Record, Thenable};

use crate::deferred::Deferred;
use crate::error::Error;

use std::fmt;
use std::sync::Arc;

/// A value carried by a deferred value, either as a success value or as a
/// failure reason.
#[derive(Clone, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    Undefined,

    /// An explicit empty value.
    Null,

    Bool(bool),

    Number(f64),

    Str(Arc<str>),

    /// An ordered sequence. This is the only input accepted by combinators.
    List(Vec<Value>),

    /// A callable.
    Function(Function),

    /// A host object, possibly exposing a `then` member.
    Object(Arc<dyn Object>),

    /// A deferred value of this crate.
    Deferred(Deferred),

    /// An error raised by the engine.
    Error(Arc<Error>),
}

impl Value {
    /// Returns the kind name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Object(_) => "object",
            Value::Deferred(_) => "deferred",
            Value::Error(_) => "error",
        }
    }

    /// Returns `true` for [`Value::Undefined`] and [`Value::Null`].
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_deferred(&self) -> Option<&Deferred> {
        match self {
            Value::Deferred(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&Error> {
        match self {
            Value::Error(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Consumes a list value into its items.
    ///
    /// Anything else is reported as an [`Error::NotSequence`] failure
    /// reason.
    pub(crate) fn into_sequence(self) -> Result<Vec<Value>, Value> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(Error::NotSequence {
                found: other.type_name(),
            }
            .into()),
        }
    }
}

impl PartialEq for Value {
    /// Data variants compare structurally, everything with identity
    /// compares by reference.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            (Value::Deferred(a), Value::Deferred(b)) => a.ptr_eq(b),
            (Value::Error(a), Value::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Object(object) => fmt::Debug::fmt(object, f),
            Value::Deferred(deferred) => fmt::Debug::fmt(deferred, f),
            Value::Error(error) => write!(f, "Error({error})"),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize, f32, f64);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Value::Undefined, Into::into)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl From<Deferred> for Value {
    fn from(d: Deferred) -> Self {
        Value::Deferred(d)
    }
}

impl From<Error> for Value {
    fn from(e: Error) -> Self {
        Value::Error(Arc::new(e))
    }
}

impl<O: Object + 'static> From<Arc<O>> for Value {
    fn from(object: Arc<O>) -> Self {
        Value::Object(object)
    }
}
