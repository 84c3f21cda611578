//! Response verification.
//!
//! When a server public key is configured, a response is only accepted if at
//! least one of its `Body-Signature-Ed25519` values verifies against the exact
//! body bytes. Without a key every response is accepted as-is.

use chronicle_core::{HttpResponse, headers};
use chronicle_crypto::{PublicKey, Signature, codec};
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{ChronicleError, ChronicleResult};

/// Checks response signatures and decodes verified bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseVerifier {
    public_key: Option<PublicKey>,
}

impl ResponseVerifier {
    /// Verify against `public_key`, or accept everything when `None`.
    #[must_use]
    pub const fn new(public_key: Option<PublicKey>) -> Self {
        Self { public_key }
    }

    /// A verifier that accepts every response unchecked.
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self::new(None)
    }

    /// The server public key, if verification is enabled.
    #[must_use]
    pub const fn public_key(&self) -> Option<&PublicKey> {
        self.public_key.as_ref()
    }

    /// Whether responses are checked at all.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.public_key.is_some()
    }

    /// Check the signature headers of `response`.
    ///
    /// Header values are tried in the order received and the first one that
    /// verifies wins. Values that are not valid base64url, or do not decode to
    /// 64 bytes, are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::HeaderMissing`] if a key is configured and no
    /// signature header is present, or [`ChronicleError::InvalidSignature`]
    /// if none of them verifies.
    pub fn verify(&self, response: &HttpResponse) -> ChronicleResult<()> {
        let Some(public_key) = &self.public_key else {
            trace!("No server public key configured, skipping verification");
            return Ok(());
        };

        let mut seen = 0usize;
        for (index, value) in response.headers.get_all(headers::SIGNATURE).enumerate() {
            seen = index.saturating_add(1);
            let signature = match Signature::from_base64(value.trim()) {
                Ok(signature) => signature,
                Err(e) => {
                    debug!(index, error = %e, "Skipping malformed signature header");
                    continue;
                },
            };
            if codec::verify(&signature, &response.body, public_key) {
                debug!(
                    index,
                    key_id = %public_key.key_id_hex(),
                    "Response signature verified"
                );
                return Ok(());
            }
        }

        if seen == 0 {
            warn!(header = headers::SIGNATURE, "Response carried no signature header");
            return Err(ChronicleError::HeaderMissing {
                header: headers::SIGNATURE,
            });
        }

        warn!(
            headers = seen,
            key_id = %public_key.key_id_hex(),
            "No response signature verified"
        );
        Err(ChronicleError::InvalidSignature)
    }

    /// Verify `response` and decode its body as JSON.
    ///
    /// The body bytes are used as received for both steps.
    ///
    /// # Errors
    ///
    /// Any error from [`ResponseVerifier::verify`], or
    /// [`ChronicleError::MalformedPayload`] if the body is not JSON.
    pub fn verify_and_decode(&self, response: &HttpResponse) -> ChronicleResult<Value> {
        self.verify(response)?;
        serde_json::from_slice(&response.body).map_err(ChronicleError::MalformedPayload)
    }
}

impl From<Option<PublicKey>> for ResponseVerifier {
    fn from(public_key: Option<PublicKey>) -> Self {
        Self::new(public_key)
    }
}
