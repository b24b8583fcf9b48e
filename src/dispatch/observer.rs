//! View-facing observation handles for state and effects.

use tokio::sync::{broadcast, watch};

/// Live view onto the state cell.
///
/// The first [`recv`](Self::recv) resolves immediately with the state that
/// was current at attach time; subsequent calls resolve with later values.
/// Delivery is latest-value-wins: a slow observer skips intermediate states
/// but always ends up at the newest one. Independent observers each hold
/// their own cursor.
pub struct StateObserver<S> {
    rx: watch::Receiver<S>,
}

impl<S: Clone> StateObserver<S> {
    pub(super) fn new(rx: watch::Receiver<S>) -> Self {
        Self { rx }
    }

    /// Snapshot of the current state, without consuming the observer's
    /// pending notification.
    pub fn current(&self) -> S {
        self.rx.borrow().clone()
    }

    /// Wait for the next unseen state value.
    ///
    /// Returns `None` once the owning dispatcher has been torn down and no
    /// unseen value remains.
    pub async fn recv(&mut self) -> Option<S> {
        match self.rx.changed().await {
            Ok(()) => Some(self.rx.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}

/// Live view onto the effect channel.
///
/// Only effects emitted while this observer is attached are visible; there
/// is no replay of earlier emissions. Effects arrive in emission order.
pub struct EffectObserver<E> {
    rx: broadcast::Receiver<E>,
}

impl<E: Clone> EffectObserver<E> {
    pub(super) fn new(rx: broadcast::Receiver<E>) -> Self {
        Self { rx }
    }

    /// Wait for the next effect.
    ///
    /// An observer that falls behind the channel capacity skips the
    /// overwritten effects (logged at `warn`) rather than stalling the
    /// controller. Returns `None` once the owning dispatcher has been torn
    /// down.
    pub async fn recv(&mut self) -> Option<E> {
        loop {
            match self.rx.recv().await {
                Ok(effect) => return Some(effect),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "effect observer lagged, skipping");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
