//! Transport error types.

use thiserror::Error;

/// Errors raised by a [`Transport`](crate::Transport) implementation.
///
/// The protocol layer never interprets these; they reach the caller as-is.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code.
        status: u16,
        /// Response body, lossily decoded as UTF-8.
        body: String,
    },

    /// The request could not be built (bad URL, bad header value, ...).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
