//! The dispatcher: one intent queue, one state cell, one effect channel.

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use crate::shutdown::ShutdownHandle;

use super::config::DispatchConfig;
use super::context::DispatchContext;
use super::controller::Controller;
use super::observer::{EffectObserver, StateObserver};

/// Owning handle for one running MVI instance.
///
/// Starting a dispatcher runs [`Controller::initialize`] and spawns the
/// single consumer task that drains the intent queue. The handle is the
/// view-facing surface: it submits intents and hands out state/effect
/// observers. All writes to the state cell happen on the consumer task.
///
/// Teardown is explicit ([`stop`](Self::stop)) or implicit on drop. Intents
/// still queued at teardown are discarded, and every observer's `recv`
/// drains to `None`.
pub struct Dispatcher<C: Controller> {
    intents: mpsc::UnboundedSender<C::Intent>,
    state: watch::Receiver<C::State>,
    /// Taken on `stop()` so effect observers see the channel close even
    /// while the handle itself is still alive.
    effects: Mutex<Option<broadcast::Sender<C::Effect>>>,
    shutdown: ShutdownHandle,
    worker: JoinHandle<()>,
}

impl<C: Controller> Dispatcher<C> {
    /// Start a dispatcher with the default [`DispatchConfig`].
    pub fn start(controller: C) -> Self {
        Self::start_with_config(controller, DispatchConfig::default())
    }

    /// Start a dispatcher, spawning its consumer loop on the current tokio
    /// runtime.
    pub fn start_with_config(controller: C, config: DispatchConfig) -> Self {
        let initial = controller.initialize();
        let (state_tx, state_rx) = watch::channel(initial);
        let (effect_tx, _) = broadcast::channel(config.effect_capacity.max(1));
        let (intent_tx, intent_rx) = mpsc::unbounded_channel();
        let shutdown = ShutdownHandle::new();

        let ctx = DispatchContext::new(state_tx, effect_tx.clone());
        let worker = tokio::spawn(consume_intents(
            controller,
            intent_rx,
            ctx,
            shutdown.clone(),
        ));

        Self {
            intents: intent_tx,
            state: state_rx,
            effects: Mutex::new(Some(effect_tx)),
            shutdown,
            worker,
        }
    }

    /// Enqueue an intent for serialized processing.
    ///
    /// Never blocks and never fails as observable to the caller: the queue
    /// is unbounded, and a submission after teardown is discarded.
    pub fn submit_intent(&self, intent: C::Intent) {
        if self.intents.send(intent).is_err() {
            tracing::debug!("intent discarded: dispatcher stopped");
        }
    }

    /// Snapshot of the current state.
    pub fn current_state(&self) -> C::State {
        self.state.borrow().clone()
    }

    /// Attach a state observer.
    ///
    /// The observer's first `recv` yields the current state immediately,
    /// then subsequent values as they are published.
    pub fn observe_state(&self) -> StateObserver<C::State> {
        let mut rx = self.state.clone();
        rx.mark_changed();
        StateObserver::new(rx)
    }

    /// Attach an effect observer.
    ///
    /// Only effects emitted after this call are visible to it.
    pub fn observe_effects(&self) -> EffectObserver<C::Effect> {
        let rx = match self.effects.lock().as_ref() {
            Some(tx) => tx.subscribe(),
            None => closed_effect_receiver(),
        };
        EffectObserver::new(rx)
    }

    /// Clone of the lifecycle latch, for hosts that tie teardown into
    /// their own shutdown sequencing.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.shutdown.clone()
    }

    /// Whether the consumer loop is still alive.
    ///
    /// `false` after [`stop`](Self::stop), and also after a controller panic
    /// killed the loop.
    pub fn is_running(&self) -> bool {
        !self.shutdown.is_shutting_down() && !self.worker.is_finished()
    }

    /// Tear the instance down. Idempotent.
    ///
    /// Queued intents are discarded, an in-flight `handle_intent` is
    /// cancelled at its next await point, and all state/effect observers
    /// drain to `None`.
    pub fn stop(&self) {
        self.shutdown.signal();
        self.worker.abort();
        self.effects.lock().take();
    }
}

impl<C: Controller> Drop for Dispatcher<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Receiver on an already-closed channel, for observers attached after
/// teardown.
fn closed_effect_receiver<E: Clone>() -> broadcast::Receiver<E> {
    let (tx, rx) = broadcast::channel(1);
    drop(tx);
    rx
}

/// The single consumer loop: strict FIFO, one intent fully handled before
/// the next begins.
async fn consume_intents<C: Controller>(
    mut controller: C,
    mut intents: mpsc::UnboundedReceiver<C::Intent>,
    ctx: DispatchContext<C::State, C::Effect>,
    shutdown: ShutdownHandle,
) {
    loop {
        tokio::select! {
            // Shutdown wins over a pending intent: nothing queued at
            // teardown is ever handled.
            biased;
            _ = shutdown.wait() => break,
            next = intents.recv() => match next {
                Some(intent) => controller.handle_intent(intent, &ctx).await,
                None => break,
            },
        }
    }
    tracing::debug!("intent loop stopped");
}
