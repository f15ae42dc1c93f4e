//! # Pledge
//!
//! **Pledge** is a deferred-value engine for Rust, built as the
//! callback-ordering layer of the **Nebula** ecosystem.
//!
//! A [`Deferred`] represents the eventual result of an operation that may
//! complete synchronously or asynchronously, exactly once, either
//! succeeded with a value or failed with a reason. Pledge provides:
//!
//! - A **settlement core** whose first settlement wins and whose reactions
//!   always run on a later turn, in registration order
//! - A **resolution procedure** that unwraps nested deferred values and
//!   foreign *thenables*, and rejects chains that resolve with themselves
//! - **Chaining** through [`then`](Deferred::then),
//!   [`catch`](Deferred::catch) and [`finally`](Deferred::finally)
//! - **Fan-in combinators**: [`all`](Deferred::all),
//!   [`all_settled`](Deferred::all_settled), [`any`](Deferred::any) and
//!   [`race`](Deferred::race)
//! - A lightweight **event-loop runtime**, plus a manually drained
//!   [`LocalQueue`] for deterministic tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pledge::{Deferred, Function, RuntimeBuilder, Value};
//!
//! fn main() {
//!     let runtime = RuntimeBuilder::new().build();
//!
//!     let total = runtime.block_on(async {
//!         let parts = Deferred::all(vec![
//!             Deferred::resolve(1),
//!             Deferred::resolve(2),
//!             Deferred::resolve(3),
//!         ]);
//!
//!         parts
//!             .then(
//!                 Some(Function::unary(|list| {
//!                     let sum: f64 = list
//!                         .as_list()
//!                         .unwrap_or_default()
//!                         .iter()
//!                         .filter_map(Value::as_number)
//!                         .sum();
//!                     Ok(Value::from(sum))
//!                 })),
//!                 None,
//!             )
//!             .await
//!     });
//!
//!     assert_eq!(total, Ok(Value::from(6)));
//! }
//! ```
//!
//! ## Values
//!
//! Outcomes are dynamically typed [`Value`]s, since a reaction may hand
//! back a plain value, another deferred value or any [`Object`] exposing a
//! callable `then` member. Returning `Err` from a [`Function`] is how a
//! handler "throws".

mod combinator;
mod deferred;
mod error;
mod runtime;
mod value;

pub use deferred::{Deferred, Fail, Outcome, Resolvers, State, Succeed};
pub use error::Error;
pub use runtime::{Handle, Job, LocalQueue, Runtime, RuntimeBuilder, Schedule};
pub use value::{Function, Object, Record, Thenable, Value};
