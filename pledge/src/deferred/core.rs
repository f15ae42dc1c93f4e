use crate::value::Value;

use std::task::Waker;

/// Outcome of a settled deferred value: the success value or the failure
/// reason.
pub type Outcome = Result<Value, Value>;

/// Lifecycle of a deferred value.
///
/// Transitions are monotonic: `Pending → Succeeded` or `Pending → Failed`,
/// exactly once.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum State {
    #[default]
    Pending,
    Succeeded(Value),
    Failed(Value),
}

impl State {
    pub fn is_pending(&self) -> bool {
        matches!(self, State::Pending)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// Returns the outcome, or `None` while pending.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            State::Pending => None,
            State::Succeeded(value) => Some(Ok(value.clone())),
            State::Failed(reason) => Some(Err(reason.clone())),
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            State::Pending => "pending",
            State::Succeeded(_) => "succeeded",
            State::Failed(_) => "failed",
        }
    }
}

/// A reaction waiting on settlement.
///
/// The success and failure handlers of a `then` call are fused into one
/// closure that dispatches on the [`Outcome`]; exactly one branch runs.
pub(crate) struct Reaction {
    run: Box<dyn FnOnce(Outcome) + Send>,
}

impl Reaction {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: FnOnce(Outcome) + Send + 'static,
    {
        Self { run: Box::new(f) }
    }

    pub(crate) fn run(self, outcome: Outcome) {
        (self.run)(outcome)
    }
}

/// Mutable part of a deferred value, guarded by its mutex.
#[derive(Default)]
pub(crate) struct Core {
    pub(crate) state: State,

    /// Reactions registered while pending, in registration order.
    reactions: Vec<Reaction>,

    /// Tasks awaiting the value as a future.
    waiters: Vec<Waker>,
}

impl Core {
    /// Moves out of `Pending` into `next`.
    ///
    /// Returns the drained reactions and waiters, or `None` if the value was
    /// already settled, in which case nothing changes.
    pub(crate) fn settle(&mut self, next: State) -> Option<(Vec<Reaction>, Vec<Waker>)> {
        if self.state.is_settled() {
            return None;
        }

        self.state = next;

        Some((
            std::mem::take(&mut self.reactions),
            std::mem::take(&mut self.waiters),
        ))
    }

    /// Queues `reaction` while pending.
    ///
    /// Once settled, the reaction is handed back along with the outcome so
    /// the caller can schedule it right away.
    pub(crate) fn register(&mut self, reaction: Reaction) -> Result<(), (Reaction, Outcome)> {
        match self.state.outcome() {
            None => {
                self.reactions.push(reaction);
                Ok(())
            }
            Some(outcome) => Err((reaction, outcome)),
        }
    }

    pub(crate) fn register_waker(&mut self, waker: &Waker) {
        if !self.waiters.iter().any(|w| w.will_wake(waker)) {
            self.waiters.push(waker.clone());
        }
    }
}
