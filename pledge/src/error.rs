//! Errors raised by the engine itself.
//!
//! Failure reasons in this crate are arbitrary [`Value`]s. The variants
//! below are the ones `pledge` produces on its own, carried through the
//! failure channel as [`Value::Error`].

use crate::value::Value;

use std::any::Any;

use thiserror::Error;

/// An error produced by the deferred-value engine.
#[derive(Debug, Error)]
pub enum Error {
    /// A reaction returned the very deferred value it was meant to settle.
    #[error("chaining cycle detected for deferred value")]
    ChainCycle,

    /// A combinator received something other than a list.
    #[error("{found} is not a sequence")]
    NotSequence {
        /// Kind name of the rejected input.
        found: &'static str,
    },

    /// Every input of `any` failed.
    #[error("all {} inputs failed", .reasons.len())]
    Aggregate {
        /// Failure reasons, in input order.
        reasons: Vec<Value>,
    },

    /// User code panicked while being invoked by the engine.
    #[error("callback panicked: {0}")]
    Panicked(String),

    /// No scheduler handle is installed on the current thread.
    #[error("no runtime is active on this thread")]
    NoRuntime,

    /// A free-form error raised by user code.
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Builds a free-form [`Error::Message`].
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }

    /// Returns the failure reasons of an [`Error::Aggregate`].
    pub fn reasons(&self) -> Option<&[Value]> {
        match self {
            Error::Aggregate { reasons } => Some(reasons.as_slice()),
            _ => None,
        }
    }

    /// Converts a caught panic payload into an [`Error::Panicked`].
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };

        Error::Panicked(message)
    }
}
