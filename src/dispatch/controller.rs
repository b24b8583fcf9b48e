//! The business-logic seam of the dispatch runtime.

use async_trait::async_trait;

use super::context::DispatchContext;
use super::effect::Effect;
use super::intent::Intent;
use super::state::State;

/// Owner of all state transitions and side effects for one dispatcher.
///
/// Implementations supply the initial state and consume intents one at a
/// time. `handle_intent` may await internal asynchronous work (a network
/// call, a timer); the next intent is not started until the current
/// invocation has fully completed, so two intents never race on the state
/// cell.
///
/// # Errors
///
/// Implementations are expected to resolve their own failures — typically by
/// encoding them into a `State` field or an error `Effect`. A panic that
/// escapes `handle_intent` permanently stops the consumer loop for this
/// instance; there is no automatic restart.
#[async_trait]
pub trait Controller: Send + 'static {
    /// The intent type this controller consumes.
    type Intent: Intent;

    /// The state type this controller publishes.
    type State: State;

    /// The effect type this controller emits.
    type Effect: Effect;

    /// Produce the initial state.
    ///
    /// Called exactly once, before any intent is accepted. Must depend only
    /// on construction-time inputs.
    fn initialize(&self) -> Self::State;

    /// Consume one intent.
    ///
    /// May call [`DispatchContext::update_state`] and
    /// [`DispatchContext::emit_effect`] any number of times, including zero.
    async fn handle_intent(
        &mut self,
        intent: Self::Intent,
        ctx: &DispatchContext<Self::State, Self::Effect>,
    );
}
