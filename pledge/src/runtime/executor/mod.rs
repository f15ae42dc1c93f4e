//! Event-loop executor.
//!
//! - [`core`]: executor lifecycle, owning the event-loop thread,
//! - [`worker`]: the loop that drains the injector.
//!
//! A single worker drains a single FIFO queue. Reactions registered on the
//! same deferred value are queued in registration order, so one worker is
//! enough to run them in that order as well.

pub(crate) mod core;
pub(crate) mod worker;
