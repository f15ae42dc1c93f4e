use crate::runtime::block_on;
use crate::runtime::executor::core::Executor;
use crate::runtime::handle::Handle;

use std::future::Future;
use std::io;
use std::time::Duration;

use tracing::debug;

/// The main runtime handle.
///
/// `Runtime` is responsible for:
/// - owning the event-loop thread that runs every scheduled reaction,
/// - handing out the scheduler [`Handle`] deferred values attach to,
/// - providing synchronous entry points via [`block_on`](Self::block_on).
///
/// Dropping the runtime stops the event loop in an orderly fashion.
pub struct Runtime {
    /// Executor owning the event-loop thread.
    executor: Executor,

    /// Handle feeding the executor's injector.
    handle: Handle,
}

impl Runtime {
    /// Creates a new runtime instance and starts its event loop.
    pub(crate) fn new(thread_name: String, park_interval: Duration) -> io::Result<Self> {
        let (executor, handle) = Executor::new(thread_name, park_interval)?;

        debug!(?park_interval, "runtime started");

        Ok(Self { executor, handle })
    }

    /// Returns the scheduler handle of this runtime.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Runs `f` on the calling thread with this runtime as the current
    /// scheduler.
    ///
    /// Deferred values and combinators created inside `f` schedule their
    /// reactions on this runtime.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let all = runtime.enter(|| Deferred::all(vec![1, 2, 3]));
    /// ```
    pub fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        self.handle.enter(f)
    }

    /// Queues a closure on the event loop.
    pub fn spawn<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.handle.spawn(f);
    }

    /// Runs a future to completion, blocking the current thread.
    ///
    /// The future is polled on the calling thread with the runtime context
    /// entered, while reactions keep running on the event loop. This is the
    /// synchronous entry point of the runtime (e.g. in `main` or tests).
    ///
    /// # Panics
    ///
    /// Panics if called from the event-loop thread itself, which would
    /// deadlock the runtime.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let result = runtime.block_on(async {
    ///     Deferred::resolve(42).await
    /// });
    /// assert_eq!(result, Ok(Value::from(42)));
    /// ```
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.enter(|| block_on::block_on(future))
    }

    /// Like [`block_on`](Self::block_on), but gives up after `timeout`.
    ///
    /// Returns `None` if the future did not complete in time.
    ///
    /// # Panics
    ///
    /// Panics if called from the event-loop thread itself.
    pub fn block_on_timeout<F: Future>(&self, timeout: Duration, future: F) -> Option<F::Output> {
        self.enter(|| block_on::block_on_timeout(future, timeout))
    }
}

impl Drop for Runtime {
    /// Shuts down the runtime.
    ///
    /// This performs the following steps:
    /// 1. Signals the event loop to stop and discards queued jobs
    /// 2. Joins the event-loop thread
    fn drop(&mut self) {
        self.executor.shutdown();
        self.executor.join();

        debug!("runtime stopped");
    }
}
