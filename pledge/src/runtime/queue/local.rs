use crate::runtime::context::enter_context;
use crate::runtime::handle::{Handle, Job, Schedule};

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

/// A scheduler drained manually by its owner.
///
/// `LocalQueue` never runs anything on its own: jobs accumulate until
/// [`run_next`](Self::run_next) or [`run_until_idle`](Self::run_until_idle)
/// is called, which makes every turn of a deferred chain observable. It is
/// the natural choice for deterministic tests and for embedding the engine
/// into an existing event loop.
///
/// # Examples
///
/// ```rust,ignore
/// let queue = LocalQueue::new();
/// let doubled = queue.enter(|| {
///     let double = Function::unary(|v| Ok(Value::from(v.as_number().unwrap_or(0.0) * 2.0)));
///     Deferred::resolve(21).then(Some(double), None)
/// });
/// queue.run_until_idle();
/// ```
pub struct LocalQueue {
    jobs: Arc<Jobs>,
    handle: Handle,
}

#[derive(Default)]
struct Jobs {
    inner: Mutex<VecDeque<Job>>,
}

impl Schedule for Jobs {
    fn schedule(&self, job: Job) {
        self.inner.lock().push_back(job);
    }
}

impl LocalQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        let jobs = Arc::new(Jobs::default());
        let handle = Handle::new(jobs.clone());

        Self { jobs, handle }
    }

    /// Returns the scheduler handle of this queue.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Runs `f` with this queue installed as the current scheduler.
    pub fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        self.handle.enter(f)
    }

    /// Number of jobs waiting to run.
    pub fn len(&self) -> usize {
        self.jobs.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs the oldest queued job inside this queue's context.
    ///
    /// Returns `false` if the queue was empty. A panicking job unwinds into
    /// the caller.
    pub fn run_next(&self) -> bool {
        let job = self.jobs.inner.lock().pop_front();

        match job {
            Some(job) => {
                enter_context(self.handle.clone(), job);
                true
            }
            None => false,
        }
    }

    /// Runs jobs until the queue is empty, including jobs queued by the jobs
    /// themselves.
    ///
    /// Returns the number of jobs that ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;

        while self.run_next() {
            ran += 1;
        }

        ran
    }
}

impl Default for LocalQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LocalQueue {
    /// Drops jobs that never ran.
    fn drop(&mut self) {
        // Queued jobs hold deferred values, which hold this queue's handle.
        let abandoned = std::mem::take(&mut *self.jobs.inner.lock());
        drop(abandoned);
    }
}
