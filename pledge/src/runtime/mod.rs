//! Scheduling layer.
//!
//! Deferred values never run reactions synchronously: every reaction is
//! handed to a [`Schedule`] implementation and runs on a later turn. This
//! module provides that seam and two implementations of it.
//!
//! It is responsible for:
//! - the [`Schedule`] contract and the [`Handle`] deferred values hold,
//! - the thread-local context that makes a handle "current",
//! - the [`Runtime`], an event-loop thread draining a FIFO injector,
//! - the [`LocalQueue`], drained manually by its owner.

mod block_on;
mod core;
mod executor;
mod queue;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod handle;

pub use self::core::Runtime;
pub use builder::RuntimeBuilder;
pub use handle::{Handle, Job, Schedule};
pub use queue::local::LocalQueue;
