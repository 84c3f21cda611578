//! Client error types.

use chronicle_core::TransportError;
use chronicle_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while talking to the ledger service.
///
/// Every failure is scoped to the single call that produced it.
#[derive(Debug, Error)]
pub enum ChronicleError {
    /// A signed write was attempted before `authenticate()`.
    #[error("no credentials set: call authenticate() before write operations")]
    Unauthenticated,

    /// Verification is required but the response carried no signature header.
    #[error("no signed response header ({header}) found")]
    HeaderMissing {
        /// Name of the expected header.
        header: &'static str,
    },

    /// Signature headers were present but none verified against the server key.
    #[error("no valid signature given for this HTTP response")]
    InvalidSignature,

    /// The (verified) response body is not valid JSON.
    #[error("malformed response payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// A request body could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The configured base URL cannot carry API paths.
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A caller-supplied path segment would be dropped or resolved as a
    /// dot segment, sending the request to a different endpoint.
    #[error("invalid path segment {0:?}: dot segments cannot be addressed")]
    InvalidPathSegment(String),

    /// Key material could not be decoded.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Error raised by the transport, passed through unmodified.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error (reading config files, starting the blocking runtime).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations.
pub type ChronicleResult<T> = Result<T, ChronicleError>;
