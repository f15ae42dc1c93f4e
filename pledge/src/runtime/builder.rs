use super::core::Runtime;

use std::io;
use std::time::Duration;

/// Builder for configuring and creating a runtime.
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new()
///     .thread_name("reactions")
///     .park_interval(Duration::from_millis(5))
///     .build();
/// ```
pub struct RuntimeBuilder {
    /// Name given to the event-loop thread.
    thread_name: String,

    /// Upper bound on a single park of the idle event loop.
    park_interval: Duration,
}

impl RuntimeBuilder {
    /// Creates a new `RuntimeBuilder` with default configuration.
    ///
    /// The event-loop thread is named `pledge-event-loop` and parks for at
    /// most 1ms at a time.
    pub fn new() -> Self {
        Self {
            thread_name: "pledge-event-loop".to_string(),
            park_interval: Duration::from_millis(1),
        }
    }

    /// Sets the name of the event-loop thread.
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Sets how long the idle event loop parks before re-checking its
    /// queue.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn park_interval(mut self, interval: Duration) -> Self {
        assert!(!interval.is_zero(), "park_interval must be > 0");

        self.park_interval = interval;
        self
    }

    /// Builds the runtime with the configured options.
    ///
    /// # Panics
    ///
    /// Panics if the event-loop thread cannot be spawned. Use
    /// [`try_build`](Self::try_build) to handle that case.
    pub fn build(self) -> Runtime {
        match self.try_build() {
            Ok(runtime) => runtime,
            Err(err) => panic!("failed to start runtime: {err}"),
        }
    }

    /// Builds the runtime, reporting a failure to spawn the event-loop
    /// thread.
    pub fn try_build(self) -> io::Result<Runtime> {
        Runtime::new(self.thread_name, self.park_interval)
    }
}

impl Default for RuntimeBuilder {
    /// Creates a default `RuntimeBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
