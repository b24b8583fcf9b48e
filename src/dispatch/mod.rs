//! Model-View-Intent (MVI) dispatch runtime.
//!
//! This module provides the channel fabric for unidirectional data flow
//! between a view and the controller that owns its business logic.
//!
//! # Architecture
//!
//! ```text
//! View ──intent──→ [ queue ] ──→ Controller ──┬──→ State  ──→ observers
//!  ↑                (FIFO,        (serialized) │   (latest value wins)
//!  │                 unbounded)                └──→ Effect ──→ observers
//!  └──────────────────────────────────────────────── (no replay) ─┘
//! ```
//!
//! - **Intent**: user actions or system events, queued without backpressure
//! - **State**: immutable snapshot of what the view should render
//! - **Effect**: one-shot notifications (toast, navigation) that are never
//!   retained for late observers
//! - **Controller**: owns all state transitions and side effects; intents are
//!   handled strictly one at a time, in submission order
//!
//! The runtime makes no assumption about the host's lifecycle API: a
//! [`Dispatcher`] is started explicitly and stopped with [`Dispatcher::stop`]
//! (or by dropping it).

mod config;
mod context;
mod controller;
mod dispatcher;
mod effect;
mod intent;
mod observer;
mod state;

pub use config::DispatchConfig;
pub use context::DispatchContext;
pub use controller::Controller;
pub use dispatcher::Dispatcher;
pub use effect::Effect;
pub use intent::Intent;
pub use observer::{EffectObserver, StateObserver};
pub use state::State;
