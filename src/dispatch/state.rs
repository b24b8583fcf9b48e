//! Base trait for view state.

/// Marker trait for state objects.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq so unchanged states are not re-published)
pub trait State: Clone + PartialEq + Send + Sync + 'static {}
