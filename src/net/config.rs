//! Call-site configuration for the request helpers.

/// Options passed explicitly to each request helper.
#[derive(Debug, Clone, Default)]
pub struct NetConfig {
    /// Log full request/response bodies at `debug` (error bodies at
    /// `error`). Off by default; bodies can be large and sensitive.
    pub log_bodies: bool,
}

impl NetConfig {
    pub fn with_body_logging() -> Self {
        Self { log_bodies: true }
    }
}
