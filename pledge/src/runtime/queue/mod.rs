//! Job queues backing the schedulers.
//!
//! - [`injector`]: the global FIFO queue drained by the runtime's
//!   event-loop thread, with parking support,
//! - [`local`]: a FIFO queue drained manually by its owner.
//!
//! Both are strictly first-in first-out, which is what gives reactions on
//! the same deferred value their registration order.

pub(crate) mod injector;
pub(crate) mod local;
