//! Error types for the response adapters.

use thiserror::Error;

/// Errors produced while executing a request or decoding its body.
#[derive(Debug, Error)]
pub enum NetError {
    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never produced a usable response (DNS, connect,
    /// timeout, protocol errors).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body arrived but could not be decoded into the expected type.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A streaming body ended before its completion marker.
    #[error("stream ended before completion")]
    Truncated,
}

impl NetError {
    /// Short classification string for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            NetError::Status { .. } => "status",
            NetError::Transport(_) => "transport",
            NetError::Decode(_) => "decode",
            NetError::Truncated => "truncated",
        }
    }

    /// HTTP status, if the server got far enough to send one.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetError::Status { status, .. } => Some(*status),
            NetError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
