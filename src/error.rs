//! Error types for portal access.

use thiserror::Error;

/// Errors produced while talking to the portal.
#[derive(Debug, Error)]
pub enum PortalError {
    /// A required input was missing or malformed before any request was made.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (DNS, connect, timeout, body read).
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The portal answered with a non-success status.
    #[error("upstream returned HTTP {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    /// A URL could not be parsed or resolved.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl PortalError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True if this error should map to a 400 rather than a 500.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
