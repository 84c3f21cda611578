//! Chronicle Crypto - signing primitives for the Chronicle ledger client.
//!
//! This crate provides:
//! - Ed25519 key pairs for signing outgoing request bodies
//! - Public keys for verifying response bodies from the ledger service
//! - Detached signatures and their URL-safe base64 wire encoding
//!
//! # Example
//!
//! ```
//! use chronicle_crypto::{KeyPair, codec};
//!
//! let keypair = KeyPair::generate();
//! let body = br#"{"comment":"hello"}"#;
//!
//! // Detached signature over the exact body bytes
//! let signature = codec::sign(body, &keypair);
//!
//! // Header value as sent on the wire
//! let header = signature.to_base64();
//!
//! // Verify against the exact same bytes
//! assert!(codec::verify(&signature, body, &keypair.export_public_key()));
//! assert!(!header.contains('='));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod codec;
pub mod prelude;

mod error;
mod keypair;
mod signature;

pub use error::{CryptoError, CryptoResult};
pub use keypair::{KeyPair, PublicKey};
pub use signature::Signature;
