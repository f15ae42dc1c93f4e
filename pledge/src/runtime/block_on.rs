use crate::runtime::context::on_worker_thread;

use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll, Wake, Waker};
use std::thread::{self, Thread};
use std::time::{Duration, Instant};

/// Wakes a parked thread.
struct ThreadWaker {
    thread: Thread,
    notified: AtomicBool,
}

impl ThreadWaker {
    fn for_current_thread() -> Arc<Self> {
        Arc::new(Self {
            thread: thread::current(),
            notified: AtomicBool::new(false),
        })
    }

    /// Parks until woken.
    fn wait(&self) {
        while !self.notified.swap(false, Ordering::AcqRel) {
            thread::park();
        }
    }

    /// Parks until woken or until `deadline`.
    ///
    /// Returns `false` if the deadline passed first.
    fn wait_until(&self, deadline: Instant) -> bool {
        while !self.notified.swap(false, Ordering::AcqRel) {
            let now = Instant::now();

            if now >= deadline {
                return false;
            }

            thread::park_timeout(deadline - now);
        }

        true
    }
}

impl Wake for ThreadWaker {
    fn wake(self: Arc<Self>) {
        self.wake_by_ref();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.notified.store(true, Ordering::Release);
        self.thread.unpark();
    }
}

fn assert_not_on_worker() {
    assert!(
        !on_worker_thread(),
        "block_on cannot be called from the runtime event-loop thread"
    );
}

/// Polls `future` on the calling thread until it completes.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    assert_not_on_worker();

    let mut future = pin!(future);
    let signal = ThreadWaker::for_current_thread();
    let waker = Waker::from(signal.clone());
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return output;
        }

        signal.wait();
    }
}

/// Polls `future` on the calling thread for at most `timeout`.
pub(crate) fn block_on_timeout<F: Future>(future: F, timeout: Duration) -> Option<F::Output> {
    assert_not_on_worker();

    let deadline = Instant::now() + timeout;
    let mut future = pin!(future);
    let signal = ThreadWaker::for_current_thread();
    let waker = Waker::from(signal.clone());
    let mut cx = Context::from_waker(&waker);

    loop {
        if let Poll::Ready(output) = future.as_mut().poll(&mut cx) {
            return Some(output);
        }

        if !signal.wait_until(deadline) {
            return None;
        }
    }
}
