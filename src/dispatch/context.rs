//! Controller-facing write surface for state and effects.

use tokio::sync::{broadcast, watch};

use super::effect::Effect;
use super::state::State;

/// Handed to [`Controller::handle_intent`](super::Controller::handle_intent);
/// the only place state transitions and effect emissions happen.
///
/// The context lives on the single consumer task, so `update_state` never
/// races with another writer.
pub struct DispatchContext<S, E> {
    state: watch::Sender<S>,
    effects: broadcast::Sender<E>,
}

impl<S: State, E: Effect> DispatchContext<S, E> {
    pub(super) fn new(state: watch::Sender<S>, effects: broadcast::Sender<E>) -> Self {
        Self { state, effects }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Atomically replace the current state with `transform(current)`.
    ///
    /// Observers are notified only if the new state differs from the old
    /// one; intermediate values may be skipped by slow observers, but the
    /// latest value is always visible.
    pub fn update_state(&self, transform: impl FnOnce(S) -> S) {
        self.state.send_if_modified(|state| {
            let next = transform(state.clone());
            if next == *state {
                false
            } else {
                *state = next;
                true
            }
        });
    }

    /// Deliver `effect` to every currently attached observer.
    ///
    /// Non-blocking. With zero observers attached the effect is dropped.
    pub fn emit_effect(&self, effect: E) {
        if self.effects.send(effect).is_err() {
            tracing::trace!("effect dropped: no active observers");
        }
    }
}
