//! Chronicle Client - signed, verifying client for the Chronicle ledger API.
//!
//! This crate provides:
//! - [`Client`] for the primary ledger: unsigned reads plus signed
//!   `register`, `revoke` and `publish` writes
//! - [`Replica`] for read-only mirrors under `/chronicle/replica/{source}`
//! - [`RequestSigner`] and [`ResponseVerifier`], the Ed25519 body-signature
//!   protocol both share
//! - [`ReqwestTransport`], the default HTTP backend for the [`Transport`] seam
//! - [`blocking`] wrappers for callers without an async runtime
//!
//! # Example
//!
//! ```rust,no_run
//! use chronicle_client::prelude::*;
//!
//! # async fn example() -> ChronicleResult<()> {
//! let config = ClientConfig::load("chronicle.toml")?;
//! let client = Client::http(&config)?;
//!
//! let chain = client.export().await?;
//! let mirrored = client.replica("upstream").last_hash().await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod blocking;
pub mod prelude;

mod client;
mod config;
mod dispatch;
mod endpoint;
mod error;
mod http;
mod replica;
mod routes;
mod signer;
mod verifier;

pub use client::Client;
pub use config::ClientConfig;
pub use endpoint::Endpoint;
pub use error::{ChronicleError, ChronicleResult};
pub use http::ReqwestTransport;
pub use replica::Replica;
pub use routes::{Route, Routes};
pub use signer::{CredentialSlot, Credentials, RequestSigner, WriteBody};
pub use verifier::ResponseVerifier;

pub use chronicle_core::{HttpRequest, HttpResponse, Transport, TransportError};
pub use chronicle_crypto::{KeyPair, PublicKey, Signature};
