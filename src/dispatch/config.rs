//! Construction-time configuration for a dispatcher.

/// Default capacity of the effect broadcast buffer.
pub const DEFAULT_EFFECT_CAPACITY: usize = 32;

/// Tuning knobs supplied to [`Dispatcher::start_with_config`].
///
/// [`Dispatcher::start_with_config`]: super::Dispatcher::start_with_config
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Per-observer buffer size of the effect channel. An observer that
    /// falls more than this many effects behind skips the overwritten ones
    /// instead of stalling the controller.
    pub effect_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            effect_capacity: DEFAULT_EFFECT_CAPACITY,
        }
    }
}
