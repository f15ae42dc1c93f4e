use crate::runtime::handle::{Job, Schedule};

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use tracing::warn;

/// Global job queue of a [`Runtime`](crate::Runtime).
///
/// Any thread may push jobs. The event-loop thread pops them in FIFO order
/// and parks on the condition variable while the queue is empty.
pub(crate) struct Injector {
    /// Jobs waiting to run.
    queue: Mutex<VecDeque<Job>>,

    /// Condition variable used to wake the parked event loop.
    condvar: Condvar,

    /// Indicates whether the runtime is shutting down.
    shutdown: AtomicBool,

    /// Upper bound on a single park.
    park_interval: Duration,
}

impl Injector {
    /// Creates a new empty injector.
    pub(crate) fn new(park_interval: Duration) -> Self {
        Injector {
            queue: Mutex::new(VecDeque::new()),
            condvar: Condvar::new(),
            shutdown: AtomicBool::new(false),
            park_interval,
        }
    }

    /// Signals shutdown and wakes the parked event loop.
    ///
    /// Jobs still queued are dropped without running.
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);

        let abandoned = std::mem::take(&mut *self.queue.lock());
        self.condvar.notify_all();

        if !abandoned.is_empty() {
            warn!(jobs = abandoned.len(), "runtime shut down with queued jobs");
        }
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Pushes a job to the back of the queue and wakes the event loop.
    ///
    /// Jobs pushed after shutdown are dropped.
    pub(crate) fn push(&self, job: Job) {
        if self.is_shutdown() {
            warn!("job scheduled after runtime shutdown, dropping it");
            return;
        }

        self.queue.lock().push_back(job);
        self.condvar.notify_all();
    }

    /// Pops the oldest job, if any.
    pub(crate) fn pop(&self) -> Option<Job> {
        self.queue.lock().pop_front()
    }

    /// Parks the calling thread until a job arrives, shutdown is signalled,
    /// or the park interval elapses.
    pub(crate) fn park(&self) {
        let mut queue = self.queue.lock();

        if self.is_shutdown() || !queue.is_empty() {
            return;
        }

        let _ = self.condvar.wait_for(&mut queue, self.park_interval);
    }
}

impl Schedule for Injector {
    fn schedule(&self, job: Job) {
        self.push(job);
    }
}
