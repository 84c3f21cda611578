//! Header names used by the signed Chronicle protocol.

/// Carries the URL-safe base64 Ed25519 signature over the message body.
///
/// May appear several times on a response (e.g. during key rotation).
pub const SIGNATURE: &str = "Body-Signature-Ed25519";

/// Carries the caller's registered client identity on signed writes.
pub const CLIENT_KEY_ID: &str = "Chronicle-Client-Key-ID";

/// Standard content type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Content type for JSON-bodied writes.
pub const APPLICATION_JSON: &str = "application/json";
