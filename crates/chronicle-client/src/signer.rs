//! Request signing and session credentials.
//!
//! A signed write carries two extra headers: the client identity and a
//! detached Ed25519 signature over the body. The signature covers the body
//! bytes only. It is computed before any header is attached.

use std::sync::{Arc, PoisonError, RwLock};

use chronicle_core::{HttpRequest, headers};
use chronicle_crypto::{KeyPair, codec};
use tracing::debug;

use crate::error::{ChronicleError, ChronicleResult};

/// A signing key together with the client identity registered for it.
///
/// The two only ever exist as a unit.
pub struct Credentials {
    key: KeyPair,
    client_id: String,
}

impl Credentials {
    /// Pair a signing key with a client identity.
    #[must_use]
    pub fn new(key: KeyPair, client_id: impl Into<String>) -> Self {
        Self {
            key,
            client_id: client_id.into(),
        }
    }

    /// The client identity sent in the `Chronicle-Client-Key-ID` header.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The signing key.
    #[must_use]
    pub fn key(&self) -> &KeyPair {
        &self.key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("key_id", &self.key.key_id_hex())
            .finish()
    }
}

/// Session-scoped holder for the current [`Credentials`].
///
/// Replacing the credentials swaps the whole pair at once. A signed call
/// takes one snapshot at its start and uses it throughout, so a concurrent
/// `set` never mixes an old key with a new identity.
#[derive(Debug, Default)]
pub struct CredentialSlot {
    current: RwLock<Option<Arc<Credentials>>>,
}

impl CredentialSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored credentials.
    pub fn set(&self, credentials: Credentials) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(Arc::new(credentials));
    }

    /// Drop the stored credentials.
    pub fn clear(&self) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Snapshot of the stored credentials, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Credentials>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The gate every write goes through.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Unauthenticated`] if no credentials are set.
    pub fn require(&self) -> ChronicleResult<Arc<Credentials>> {
        self.snapshot().ok_or(ChronicleError::Unauthenticated)
    }

    /// Whether credentials are currently set.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.snapshot().is_some()
    }
}

/// Body of a signed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteBody {
    /// JSON document; sent with `Content-Type: application/json`.
    Json(Vec<u8>),
    /// Opaque caller bytes; sent without a content type.
    Raw(Vec<u8>),
}

impl WriteBody {
    /// Encode `value` as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Serialization`] if `value` cannot be encoded.
    pub fn json<T: serde::Serialize>(value: &T) -> ChronicleResult<Self> {
        serde_json::to_vec(value)
            .map(Self::Json)
            .map_err(ChronicleError::Serialization)
    }

    fn into_parts(self) -> (Vec<u8>, Option<&'static str>) {
        match self {
            Self::Json(body) => (body, Some(headers::APPLICATION_JSON)),
            Self::Raw(body) => (body, None),
        }
    }
}

/// Attaches identity and signature headers to outgoing writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSigner;

impl RequestSigner {
    /// Build a signed POST to `url` carrying `body`.
    #[must_use]
    pub fn signed_post(url: String, body: WriteBody, credentials: &Credentials) -> HttpRequest {
        let (body, content_type) = body.into_parts();
        let mut request = HttpRequest::post(url, body);
        if let Some(content_type) = content_type {
            request.headers.insert(headers::CONTENT_TYPE, content_type);
        }
        Self::sign(request, credentials)
    }

    /// Sign `request.body` and attach the identity and signature headers.
    ///
    /// Existing headers with the same names are replaced.
    #[must_use]
    pub fn sign(mut request: HttpRequest, credentials: &Credentials) -> HttpRequest {
        let signature = codec::sign(&request.body, &credentials.key);

        debug!(
            client_id = %credentials.client_id,
            key_id = %credentials.key.key_id_hex(),
            body_len = request.body.len(),
            "Signing request body"
        );

        request
            .headers
            .insert(headers::CLIENT_KEY_ID, credentials.client_id.as_str());
        request
            .headers
            .insert(headers::SIGNATURE, signature.to_base64());
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_crypto::{PublicKey, Signature};

    fn credentials() -> Credentials {
        Credentials::new(KeyPair::from_secret_key(&[5u8; 32]).unwrap(), "client")
    }

    fn verify_header(request: &HttpRequest, public_key: &PublicKey) -> bool {
        let header = request.headers.get(headers::SIGNATURE).unwrap();
        let signature = Signature::from_base64(header).unwrap();
        codec::verify(&signature, &request.body, public_key)
    }

    #[test]
    fn test_sign_attaches_headers() {
        let creds = credentials();
        let request = RequestSigner::sign(
            HttpRequest::post("http://ledger.test/chronicle/publish", "hello"),
            &creds,
        );

        assert_eq!(request.headers.get(headers::CLIENT_KEY_ID), Some("client"));
        assert!(verify_header(&request, &creds.key().export_public_key()));
        assert!(!request.headers.contains(headers::CONTENT_TYPE));
    }

    #[test]
    fn test_signature_covers_body_only() {
        let creds = credentials();
        let plain = RequestSigner::sign(HttpRequest::post("http://a.test", "body"), &creds);
        let extra = RequestSigner::sign(
            HttpRequest::post("http://b.test", "body").with_header("X-Extra", "1"),
            &creds,
        );

        assert_eq!(
            plain.headers.get(headers::SIGNATURE),
            extra.headers.get(headers::SIGNATURE)
        );
    }

    #[test]
    fn test_json_body_gets_content_type() {
        let creds = credentials();
        let body = WriteBody::json(&serde_json::json!({"clientid": "x"})).unwrap();
        let request = RequestSigner::signed_post("http://ledger.test".into(), body, &creds);

        assert_eq!(
            request.headers.get(headers::CONTENT_TYPE),
            Some(headers::APPLICATION_JSON)
        );
        assert_eq!(request.body, br#"{"clientid":"x"}"#);
        assert!(verify_header(&request, &creds.key().export_public_key()));
    }

    #[test]
    fn test_raw_body_has_no_content_type() {
        let creds = credentials();
        let request = RequestSigner::signed_post(
            "http://ledger.test".into(),
            WriteBody::Raw(b"not json".to_vec()),
            &creds,
        );
        assert!(!request.headers.contains(headers::CONTENT_TYPE));
        assert_eq!(request.body, b"not json");
    }

    #[test]
    fn test_resigning_replaces_headers() {
        let first = credentials();
        let second = Credentials::new(KeyPair::generate(), "other");

        let request = RequestSigner::sign(HttpRequest::post("http://ledger.test", "x"), &first);
        let request = RequestSigner::sign(request, &second);

        assert_eq!(request.headers.get_all(headers::SIGNATURE).count(), 1);
        assert_eq!(request.headers.get(headers::CLIENT_KEY_ID), Some("other"));
        assert!(verify_header(&request, &second.key().export_public_key()));
    }

    #[test]
    fn test_credential_slot_gate() {
        let slot = CredentialSlot::new();
        assert!(!slot.is_set());
        assert!(matches!(slot.require(), Err(ChronicleError::Unauthenticated)));

        slot.set(credentials());
        assert_eq!(slot.require().unwrap().client_id(), "client");

        let snapshot = slot.snapshot().unwrap();
        slot.set(Credentials::new(KeyPair::generate(), "rotated"));
        // Earlier snapshots keep the pair they were taken with
        assert_eq!(snapshot.client_id(), "client");
        assert_eq!(slot.require().unwrap().client_id(), "rotated");

        slot.clear();
        assert!(matches!(slot.require(), Err(ChronicleError::Unauthenticated)));
    }

    #[test]
    fn test_credentials_debug_hides_key() {
        let creds = credentials();
        let debug = format!("{creds:?}");
        assert!(debug.contains("client"));
        assert!(debug.contains(&creds.key().key_id_hex()));
    }
}
