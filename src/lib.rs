//! Building blocks for unidirectional-data-flow applications.
//!
//! `mvikit` provides two independent pieces:
//!
//! - [`dispatch`] — a framework-agnostic Model-View-Intent runtime: an
//!   unbounded FIFO intent queue with a single serialized consumer, a
//!   latest-value state cell, and a fire-and-forget effect channel.
//! - [`net`] — typed response handling and SSE streaming decoding layered
//!   over [`reqwest`].
//!
//! The crate never installs a global logger or mutates process-wide state;
//! hosts own the tracing subscriber and pass configuration values explicitly.

pub mod dispatch;
pub mod net;
pub mod shutdown;

pub use dispatch::{
    Controller, DispatchConfig, DispatchContext, Dispatcher, Effect, EffectObserver, Intent,
    State, StateObserver,
};
pub use net::{fetch_json, fetch_sse, send_unit, NetConfig, NetError, SseStream, StreamEvent};
