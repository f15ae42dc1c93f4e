use crate::runtime::handle::Handle;

use std::cell::{Cell, RefCell};

thread_local! {
    /// Thread-local handle to the current scheduler.
    ///
    /// Set while running inside a runtime or a local queue, so that deferred
    /// values created deep inside reactions find their scheduler without
    /// explicit parameter passing.
    pub(crate) static CURRENT_HANDLE: RefCell<Option<Handle>> =
        const { RefCell::new(None) };

    /// Whether the current thread is a runtime event-loop thread.
    pub(crate) static CURRENT_WORKER: Cell<bool> = const { Cell::new(false) };
}

/// Enters the scheduling context for the current thread.
///
/// `handle` is installed as the current handle for the duration of `f`.
/// The previous context is restored afterwards, even if `f` unwinds.
pub(crate) fn enter_context<R>(handle: Handle, f: impl FnOnce() -> R) -> R {
    let previous = CURRENT_HANDLE.with(|cell| cell.replace(Some(handle)));
    let _restore = Restore(previous);

    f()
}

/// Returns `true` when called from a runtime event-loop thread.
pub(crate) fn on_worker_thread() -> bool {
    CURRENT_WORKER.with(Cell::get)
}

struct Restore(Option<Handle>);

impl Drop for Restore {
    fn drop(&mut self) {
        let previous = self.0.take();
        let _ = CURRENT_HANDLE.try_with(|cell| cell.replace(previous));
    }
}
