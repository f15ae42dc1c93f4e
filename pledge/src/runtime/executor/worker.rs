use crate::error::Error;
use crate::runtime::context::CURRENT_WORKER;
use crate::runtime::handle::Job;
use crate::runtime::queue::injector::Injector;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::{debug, error};

/// The event loop of a runtime.
///
/// The execution order is:
/// 1. Pop the oldest job from the injector
/// 2. Run it to completion
/// 3. Park if no work is available
pub(crate) struct Worker {
    /// Queue drained by this worker.
    injector: Arc<Injector>,
}

impl Worker {
    pub(crate) fn new(injector: Arc<Injector>) -> Self {
        Self { injector }
    }

    /// Runs the event loop until shutdown is signalled.
    ///
    /// Must be called with the runtime context entered, so jobs can create
    /// deferred values of their own.
    pub(crate) fn run(&self) {
        CURRENT_WORKER.with(|worker| worker.set(true));
        debug!("event loop started");

        let mut ran: u64 = 0;

        loop {
            if self.injector.is_shutdown() {
                break;
            }

            if let Some(job) = self.injector.pop() {
                run_job(job);
                ran += 1;
                continue;
            }

            self.injector.park();
        }

        debug!(jobs = ran, "event loop stopped");
    }
}

/// Runs one job, keeping the loop alive if it panics.
fn run_job(job: Job) {
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(job)) {
        error!(error = %Error::from_panic(payload), "scheduled job panicked");
    }
}
