//! Shared test controllers and helpers.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mvikit::dispatch::{Controller, DispatchContext, Effect, Intent, State, StateObserver};
use parking_lot::Mutex;

/// Install a tracing subscriber once per test binary.
///
/// `RUST_LOG` controls verbosity; repeated calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterState {
    pub count: u64,
}

impl State for CounterState {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterIntent {
    Increment,
    Add(u64),
    /// Emit `CounterEffect::Announced(current count)` without touching state.
    Announce,
    /// Sleep before applying the increment, to exercise serialization
    /// across a suspension point.
    SlowIncrement(Duration),
    /// Panic inside the handler.
    Fail,
}

impl Intent for CounterIntent {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterEffect {
    Announced(u64),
}

impl Effect for CounterEffect {}

/// Entry/exit markers recorded by [`CounterController`] for ordering
/// assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Started(CounterIntent),
    Finished(CounterIntent),
}

pub type StepLog = Arc<Mutex<Vec<Step>>>;

pub struct CounterController {
    initial: u64,
    steps: StepLog,
}

impl CounterController {
    pub fn new() -> (Self, StepLog) {
        Self::with_initial(0)
    }

    pub fn with_initial(initial: u64) -> (Self, StepLog) {
        let steps: StepLog = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                initial,
                steps: Arc::clone(&steps),
            },
            steps,
        )
    }
}

#[async_trait]
impl Controller for CounterController {
    type Intent = CounterIntent;
    type State = CounterState;
    type Effect = CounterEffect;

    fn initialize(&self) -> CounterState {
        CounterState {
            count: self.initial,
        }
    }

    async fn handle_intent(
        &mut self,
        intent: CounterIntent,
        ctx: &DispatchContext<CounterState, CounterEffect>,
    ) {
        self.steps.lock().push(Step::Started(intent));
        match intent {
            CounterIntent::Increment => ctx.update_state(|s| CounterState { count: s.count + 1 }),
            CounterIntent::Add(n) => ctx.update_state(|s| CounterState { count: s.count + n }),
            CounterIntent::Announce => {
                let count = ctx.state().count;
                ctx.emit_effect(CounterEffect::Announced(count));
            }
            CounterIntent::SlowIncrement(delay) => {
                tokio::time::sleep(delay).await;
                ctx.update_state(|s| CounterState { count: s.count + 1 });
            }
            CounterIntent::Fail => panic!("handler failure requested"),
        }
        self.steps.lock().push(Step::Finished(intent));
    }
}

/// Drive `observer` until the counter reaches `target`.
pub async fn wait_for_count(observer: &mut StateObserver<CounterState>, target: u64) {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match observer.recv().await {
                Some(state) if state.count == target => break,
                Some(_) => {}
                None => panic!("state channel closed before count reached {target}"),
            }
        }
    })
    .await
    .expect("timed out waiting for count");
}

/// Poll `pred` until it holds.
pub async fn wait_until(mut pred: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !pred() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("timed out waiting for condition");
}
