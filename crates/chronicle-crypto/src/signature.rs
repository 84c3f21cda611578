//! Ed25519 detached signatures.
//!
//! A signature travels in a response or request header as unpadded URL-safe
//! base64 and is always checked against the exact body bytes it accompanies.

use ed25519_dalek::{SIGNATURE_LENGTH, Signature as DalekSignature, VerifyingKey};
use std::fmt;

use crate::codec;
use crate::error::{CryptoError, CryptoResult};

/// An Ed25519 signature (64 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    /// Create from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Try to create from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSignatureLength`] if the slice is not exactly 64 bytes.
    pub fn try_from_slice(slice: &[u8]) -> CryptoResult<Self> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            slice
                .try_into()
                .map_err(|_| CryptoError::InvalidSignatureLength {
                    expected: SIGNATURE_LENGTH,
                    actual: slice.len(),
                })?;
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// Encode as unpadded URL-safe base64 (the header form).
    #[must_use]
    pub fn to_base64(&self) -> String {
        codec::encode(self.0)
    }

    /// Decode from URL-safe base64.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidBase64Encoding`] if the string is not
    /// base64url, or [`CryptoError::InvalidSignatureLength`] if it does not
    /// decode to 64 bytes.
    pub fn from_base64(s: &str) -> CryptoResult<Self> {
        let bytes = codec::decode(s)?;
        Self::try_from_slice(&bytes)
    }

    /// Verify this signature against a message and public key.
    ///
    /// Uses strict verification, which also rejects weak public keys and
    /// non-canonical signature encodings.
    ///
    /// # Errors
    ///
    /// Returns an error if the public key is invalid or signature verification fails.
    pub fn verify(&self, message: &[u8], public_key: &[u8; 32]) -> CryptoResult<()> {
        let verifying_key = VerifyingKey::from_bytes(public_key)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;

        verifying_key
            .verify_strict(message, &self.to_dalek())
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }

    /// Convert to the underlying dalek signature type.
    #[must_use]
    pub fn to_dalek(&self) -> DalekSignature {
        DalekSignature::from_bytes(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &hex::encode(self.0)[..16])
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base64())
    }
}

impl From<DalekSignature> for Signature {
    fn from(sig: DalekSignature) -> Self {
        Self(sig.to_bytes())
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KeyPair;

    #[test]
    fn test_signature_header_form() {
        let keypair = KeyPair::generate();
        let sig = keypair.sign(b"test message");

        let b64 = sig.to_base64();
        assert_eq!(b64.len(), 86);
        assert!(!b64.contains('='));
        assert_eq!(Signature::from_base64(&b64).unwrap(), sig);
    }

    #[test]
    fn test_signature_verification() {
        let keypair = KeyPair::generate();
        let message = b"test message";
        let sig = keypair.sign(message);

        assert!(sig.verify(message, keypair.public_key_bytes()).is_ok());

        assert!(
            sig.verify(b"wrong message", keypair.public_key_bytes())
                .is_err()
        );

        let other_keypair = KeyPair::generate();
        assert!(
            sig.verify(message, other_keypair.public_key_bytes())
                .is_err()
        );
    }

    #[test]
    fn test_invalid_signature_length() {
        let result = Signature::try_from_slice(&[0u8; 63]);
        assert!(matches!(
            result,
            Err(CryptoError::InvalidSignatureLength { .. })
        ));

        let short = codec::encode([0u8; 32]);
        assert!(matches!(
            Signature::from_base64(&short),
            Err(CryptoError::InvalidSignatureLength { expected: 64, actual: 32 })
        ));
    }

    #[test]
    fn test_invalid_signature_encoding() {
        assert!(matches!(
            Signature::from_base64("%%%"),
            Err(CryptoError::InvalidBase64Encoding)
        ));
    }
}
