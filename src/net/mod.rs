//! Typed response handling over an HTTP client.
//!
//! Thin adapters that turn [`reqwest`] responses into typed values:
//! JSON bodies into `Result<T, NetError>`, and SSE (`data:`-line) bodies
//! into a stream of [`StreamEvent`]s. Request/response logging goes through
//! `tracing` with a per-request id; body logging is opt-in via
//! [`NetConfig`], never a process-wide flag.

mod config;
mod error;
mod request;
mod sse;

pub use config::NetConfig;
pub use error::NetError;
pub use request::{fetch_json, fetch_sse, send_unit, ResponseBody};
pub use sse::{SseStream, StreamEvent};
