//! Detached signing and the URL-safe base64 wire encoding.
//!
//! Signature headers carry the URL-safe base64 form of a 64-byte Ed25519
//! signature. Values are emitted without padding. The ledger service itself
//! pads its values, so decoding accepts canonical `=` padding as well.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::{CryptoError, CryptoResult};
use crate::keypair::{KeyPair, PublicKey};
use crate::signature::Signature;

const URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as unpadded URL-safe base64.
#[must_use]
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE.encode(bytes)
}

/// Decode URL-safe base64, with or without canonical padding.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidBase64Encoding`] on characters outside the
/// URL-safe alphabet, non-canonical padding, or a truncated final quantum.
pub fn decode(encoded: &str) -> CryptoResult<Vec<u8>> {
    URL_SAFE
        .decode(encoded)
        .map_err(|_| CryptoError::InvalidBase64Encoding)
}

/// Produce a detached signature over `body`.
///
/// Ed25519 signing is deterministic: the same key and body always yield the
/// same signature.
#[must_use]
pub fn sign(body: &[u8], keypair: &KeyPair) -> Signature {
    keypair.sign(body)
}

/// Check a detached signature over `body` against `public_key`.
#[must_use]
pub fn verify(signature: &Signature, body: &[u8], public_key: &PublicKey) -> bool {
    public_key.verify(body, signature).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_unpadded_and_url_safe() {
        // 0xfb 0xff encodes to "+/8=" in the standard alphabet
        let encoded = encode([0xfb, 0xff]);
        assert_eq!(encoded, "-_8");
    }

    #[test]
    fn test_decode_accepts_padded_and_unpadded() {
        assert_eq!(decode("-_8").unwrap(), vec![0xfb, 0xff]);
        assert_eq!(decode("-_8=").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn test_decode_rejects_standard_alphabet() {
        assert!(matches!(
            decode("+/8="),
            Err(CryptoError::InvalidBase64Encoding)
        ));
    }

    #[test]
    fn test_decode_rejects_bad_padding() {
        assert!(matches!(
            decode("-_8=="),
            Err(CryptoError::InvalidBase64Encoding)
        ));
        assert!(matches!(
            decode("not base64!"),
            Err(CryptoError::InvalidBase64Encoding)
        ));
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let keypair = KeyPair::generate();
        let body = b"{\"comment\":\"foo\"}";

        let signature = sign(body, &keypair);
        assert!(verify(&signature, body, &keypair.export_public_key()));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let keypair = KeyPair::from_secret_key(&[3u8; 32]).unwrap();
        assert_eq!(sign(b"body", &keypair), sign(b"body", &keypair));
    }

    #[test]
    fn test_tamper_detection() {
        let keypair = KeyPair::generate();
        let public_key = keypair.export_public_key();
        let signature = sign(b"original", &keypair);

        assert!(!verify(&signature, b"originaL", &public_key));
        assert!(!verify(&signature, b"", &public_key));
    }

    #[test]
    fn test_empty_body_signs() {
        let keypair = KeyPair::generate();
        let signature = sign(b"", &keypair);
        assert!(verify(&signature, b"", &keypair.export_public_key()));
    }

    #[test]
    fn test_register_body_scenario() {
        let keypair = KeyPair::generate();
        let public_key = keypair.export_public_key();
        let signed = format!(
            r#"{{"publickey":"{}","comment":"foo"}}"#,
            public_key.to_base64()
        );
        let altered = format!(
            r#"{{"publickey":"{}","comment":"bar"}}"#,
            public_key.to_base64()
        );

        let signature = sign(signed.as_bytes(), &keypair);
        assert!(verify(&signature, signed.as_bytes(), &public_key));
        assert!(!verify(&signature, altered.as_bytes(), &public_key));
    }

    #[test]
    fn test_ledger_service_vector() {
        // Signature published by a ledger service over the body `["result"]`
        let public_key =
            PublicKey::from_base64("uW197cTmhf0MGDZU-NtWr1bsQ-MxSCzFa64mbjjl4MQ=").unwrap();
        let signature = Signature::from_base64(
            "Ypkdmzl7uoEmsNf5htTSmRFWKYpQskL5p3ffMjEQq4oHrwrkhQfJ1Pu9v9NF7Mth5Foa6JfSsJLcveU33pUtAQ==",
        )
        .unwrap();

        assert!(verify(&signature, br#"["result"]"#, &public_key));
        assert!(!verify(&signature, br#"["other"]"#, &public_key));
    }
}
