//! Prelude module - commonly used types for convenient import.
//!
//! Use `use chronicle_crypto::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use chronicle_crypto::prelude::*;
//!
//! let keypair = KeyPair::generate();
//! let signature = keypair.sign(b"hello");
//! assert!(keypair.export_public_key().verify(b"hello", &signature).is_ok());
//! ```

// Errors
pub use crate::{CryptoError, CryptoResult};

// Key types
pub use crate::{KeyPair, PublicKey};

// Signature
pub use crate::Signature;
