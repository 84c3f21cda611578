//! Deterministic keys and signed service responses.

use chronicle_core::{HttpResponse, headers};
use chronicle_crypto::KeyPair;

/// Seed of the key the mock ledger service signs responses with.
pub const SERVICE_SEED: [u8; 32] = [0x5e; 32];

/// Seed of the key test clients sign requests with.
pub const CLIENT_SEED: [u8; 32] = [0xc1; 32];

/// Client id paired with [`client_keypair`] in tests.
pub const TEST_CLIENT_ID: &str = "test-client";

/// Base URL used by tests; never resolved.
pub const TEST_BASE_URL: &str = "http://ledger.test";

fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    KeyPair::from_secret_key(seed).expect("32-byte seed is a valid secret key")
}

/// The mock ledger service's signing key.
///
/// # Panics
///
/// Never in practice; the seed is a fixed valid length.
#[must_use]
pub fn service_keypair() -> KeyPair {
    keypair_from_seed(&SERVICE_SEED)
}

/// A client signing key.
///
/// # Panics
///
/// Never in practice; the seed is a fixed valid length.
#[must_use]
pub fn client_keypair() -> KeyPair {
    keypair_from_seed(&CLIENT_SEED)
}

/// `200 OK` carrying `body`, signed by [`service_keypair`].
#[must_use]
pub fn signed_response(body: impl Into<Vec<u8>>) -> HttpResponse {
    signed_response_with(&service_keypair(), body)
}

/// `200 OK` carrying `body`, signed by `key`.
#[must_use]
pub fn signed_response_with(key: &KeyPair, body: impl Into<Vec<u8>>) -> HttpResponse {
    let body = body.into();
    let signature = key.sign(&body).to_base64();
    HttpResponse::ok(body).with_header(headers::SIGNATURE, signature)
}

/// `200 OK` carrying `body` with no signature header.
#[must_use]
pub fn unsigned_response(body: impl Into<Vec<u8>>) -> HttpResponse {
    HttpResponse::ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_deterministic_and_distinct() {
        assert_eq!(service_keypair().key_id(), service_keypair().key_id());
        assert_ne!(service_keypair().key_id(), client_keypair().key_id());
    }

    #[test]
    fn test_signed_response_verifies() {
        let response = signed_response("[]");
        let header = response.headers.get(headers::SIGNATURE).unwrap();
        let signature = chronicle_crypto::Signature::from_base64(header).unwrap();
        assert!(
            service_keypair()
                .export_public_key()
                .verify(b"[]", &signature)
                .is_ok()
        );
    }

    #[test]
    fn test_unsigned_response_has_no_headers() {
        assert!(unsigned_response("[]").headers.is_empty());
    }
}
