//! Error type surfaced by the dashboard API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by [`ApiClient`](super::client::ApiClient) operations.
///
/// Transport failures are forwarded exactly as the HTTP stack reported
/// them; this layer adds no classification, retry metadata, or fallback.
/// Interpretation and user-facing messaging belong to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP exchange failed: connect or DNS failure,
    /// timeout, a non-success status, or a body that could not be read or
    /// decoded.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The client could not be constructed from its configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status carried by the transport failure, when the exchange got
    /// far enough to receive one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Transport(err) => err.status(),
            Self::Config(_) => None,
        }
    }
}
