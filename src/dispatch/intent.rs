//! Base trait for intents (user/system actions).

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions (button clicks, key presses)
/// - System events (API responses, timers)
/// - Navigation events
///
/// Intents are consumed by a [`Controller`](super::Controller), one at a
/// time, in submission order.
pub trait Intent: Send + 'static {}
