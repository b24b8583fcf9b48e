//! Base trait for one-shot effects.

/// Marker trait for effect objects.
///
/// Effects are transient, fire-and-forget notifications (show a toast,
/// navigate somewhere). They are cloned per observer and never buffered for
/// observers that attach later.
pub trait Effect: Clone + Send + 'static {}
