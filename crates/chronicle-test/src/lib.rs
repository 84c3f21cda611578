//! Chronicle Test - Shared test utilities for the Chronicle client crates.
//!
//! This crate provides a scripted [`MockTransport`], deterministic key
//! fixtures and helpers for building signed service responses. It depends
//! only on `chronicle-core` and `chronicle-crypto`, so `chronicle-client`
//! can use it from its own unit tests.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! chronicle-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use chronicle_test::{MockTransport, service_keypair, signed_response};
//!
//! #[tokio::test]
//! async fn test_last_hash() {
//!     let mock = Arc::new(MockTransport::new());
//!     mock.push_response(signed_response(r#"["result"]"#));
//!
//!     let client = Client::with_shared_transport(
//!         Arc::clone(&mock),
//!         "http://ledger.test",
//!         Some(service_keypair().export_public_key()),
//!     )
//!     .unwrap();
//!     assert_eq!(client.last_hash().await.unwrap(), json!(["result"]));
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fixtures;
pub mod harness;
pub mod mocks;

pub use fixtures::*;
pub use harness::*;
pub use mocks::*;
