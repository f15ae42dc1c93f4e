use crate::runtime::context::enter_context;
use crate::runtime::executor::worker::Worker;
use crate::runtime::handle::Handle;
use crate::runtime::queue::injector::Injector;

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Owns the event-loop thread and the injector it drains.
pub(crate) struct Executor {
    /// Global injector queue shared with every handle.
    injector: Arc<Injector>,

    /// Join handle of the event-loop thread.
    thread: Option<JoinHandle<()>>,
}

impl Executor {
    /// Creates the injector and spawns the event-loop thread.
    ///
    /// Returns the executor together with the scheduler handle that feeds
    /// it.
    pub(crate) fn new(thread_name: String, park_interval: Duration) -> io::Result<(Self, Handle)> {
        let injector = Arc::new(Injector::new(park_interval));
        let handle = Handle::new(injector.clone());

        let worker = Worker::new(injector.clone());
        let context = handle.clone();

        let thread = thread::Builder::new().name(thread_name).spawn(move || {
            enter_context(context, || worker.run());
        })?;

        let executor = Self {
            injector,
            thread: Some(thread),
        };

        Ok((executor, handle))
    }

    /// Signals the event loop to stop and discards queued jobs.
    pub(crate) fn shutdown(&self) {
        self.injector.shutdown();
    }

    /// Waits for the event-loop thread to terminate.
    ///
    /// This should be called after initiating shutdown.
    pub(crate) fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
