use crate::error::Error;
use crate::runtime::context::{CURRENT_HANDLE, enter_context};

use std::fmt;
use std::sync::Arc;

/// A unit of work queued on a scheduler.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A service that runs callbacks on a later turn of execution.
///
/// Implementations must uphold these rules:
/// - a job is never run inside the `schedule` call that queued it,
/// - jobs queued on the same scheduler run in the order they were queued,
/// - `schedule` never touches a deferred value, since it may be called while
///   one is locked.
///
/// Every state transition and every reaction of a
/// [`Deferred`](crate::Deferred) goes through this trait.
pub trait Schedule: Send + Sync {
    /// Queues `job` to run later.
    fn schedule(&self, job: Job);
}

/// A cloneable handle to a scheduler.
///
/// Deferred values remember the handle that was current when they were
/// created and schedule all of their reactions through it.
#[derive(Clone)]
pub struct Handle {
    scheduler: Arc<dyn Schedule>,
}

impl Handle {
    /// Wraps a scheduler implementation.
    pub fn new(scheduler: Arc<dyn Schedule>) -> Self {
        Self { scheduler }
    }

    /// Returns the handle installed on the current thread.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime or a
    /// [`LocalQueue`](crate::LocalQueue).
    pub fn current() -> Self {
        match Self::try_current() {
            Ok(handle) => handle,
            Err(_) => panic!("must be called within the context of a runtime"),
        }
    }

    /// Returns the handle installed on the current thread, if any.
    pub fn try_current() -> Result<Self, Error> {
        CURRENT_HANDLE
            .with(|cell| cell.borrow().clone())
            .ok_or(Error::NoRuntime)
    }

    /// Runs `f` with this handle installed as the current one.
    pub fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        enter_context(self.clone(), f)
    }

    /// Queues a closure on the underlying scheduler.
    pub fn spawn<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.schedule(Box::new(f));
    }

    pub(crate) fn schedule(&self, job: Job) {
        self.scheduler.schedule(job);
    }

    /// Returns `true` if both handles drive the same scheduler.
    pub fn ptr_eq(&self, other: &Handle) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.scheduler), Arc::as_ptr(&other.scheduler))
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:p})", Arc::as_ptr(&self.scheduler))
    }
}
