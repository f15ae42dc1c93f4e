use super::{Deferred, Outcome};

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

impl Future for Deferred {
    /// The success value or the failure reason.
    type Output = Outcome;

    /// Polls the deferred value.
    ///
    /// If the value has settled, a clone of its outcome is returned, so a
    /// deferred value may be awaited any number of times. Otherwise the
    /// current waker is registered and woken on settlement.
    ///
    /// The state check and the waker registration happen under the same
    /// lock, so a settlement in between cannot be missed.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome> {
        let mut core = self.inner.core.lock();

        match core.state.outcome() {
            Some(outcome) => Poll::Ready(outcome),
            None => {
                core.register_waker(cx.waker());
                Poll::Pending
            }
        }
    }
}
