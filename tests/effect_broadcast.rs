mod common;

use common::{CounterController, CounterEffect, CounterIntent, Step};
use mvikit::dispatch::Dispatcher;

#[tokio::test]
async fn effects_are_not_replayed_to_late_observers() {
    common::init_tracing();
    let (controller, _steps) = CounterController::new();
    let dispatcher = Dispatcher::start(controller);
    let mut pacer = dispatcher.observe_state();

    // Announced(0) fires with zero observers attached and is dropped.
    dispatcher.submit_intent(CounterIntent::Announce);
    dispatcher.submit_intent(CounterIntent::Increment);
    common::wait_for_count(&mut pacer, 1).await;

    let mut observer = dispatcher.observe_effects();
    dispatcher.submit_intent(CounterIntent::Announce);

    // Only the post-attach emission is visible.
    assert_eq!(
        observer.recv().await,
        Some(CounterEffect::Announced(1))
    );
}

#[tokio::test]
async fn effects_arrive_in_emission_order() {
    common::init_tracing();
    let (controller, steps) = CounterController::new();
    let dispatcher = Dispatcher::start(controller);
    let mut observer = dispatcher.observe_effects();

    for _ in 0..3 {
        dispatcher.submit_intent(CounterIntent::Announce);
        dispatcher.submit_intent(CounterIntent::Increment);
    }
    common::wait_until(|| steps.lock().len() == 12).await;

    assert_eq!(observer.recv().await, Some(CounterEffect::Announced(0)));
    assert_eq!(observer.recv().await, Some(CounterEffect::Announced(1)));
    assert_eq!(observer.recv().await, Some(CounterEffect::Announced(2)));
}

#[tokio::test]
async fn every_attached_observer_receives_the_effect() {
    common::init_tracing();
    let (controller, steps) = CounterController::new();
    let dispatcher = Dispatcher::start(controller);
    let mut first = dispatcher.observe_effects();
    let mut second = dispatcher.observe_effects();

    dispatcher.submit_intent(CounterIntent::Announce);
    common::wait_until(|| steps.lock().contains(&Step::Finished(CounterIntent::Announce))).await;

    assert_eq!(first.recv().await, Some(CounterEffect::Announced(0)));
    assert_eq!(second.recv().await, Some(CounterEffect::Announced(0)));
}

#[tokio::test]
async fn dropping_one_observer_does_not_disturb_others() {
    common::init_tracing();
    let (controller, _steps) = CounterController::new();
    let dispatcher = Dispatcher::start(controller);
    let fragile = dispatcher.observe_effects();
    let mut durable = dispatcher.observe_effects();

    dispatcher.submit_intent(CounterIntent::Announce);
    assert_eq!(durable.recv().await, Some(CounterEffect::Announced(0)));

    drop(fragile);
    dispatcher.submit_intent(CounterIntent::Increment);
    dispatcher.submit_intent(CounterIntent::Announce);
    assert_eq!(durable.recv().await, Some(CounterEffect::Announced(1)));
}
