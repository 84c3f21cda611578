//! Chronicle Core - wire types shared by the Chronicle client and its transports.
//!
//! This crate provides:
//! - [`HttpRequest`] / [`HttpResponse`] with an ordered, case-insensitive
//!   header multimap
//! - The [`Transport`] trait that every HTTP backend implements
//! - Header names used by the signed Chronicle protocol
//!
//! It knows nothing about signing or verification; those live in
//! `chronicle-client` on top of these types.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod headers;
pub mod prelude;

mod error;
mod http;
mod transport;

pub use error::{TransportError, TransportResult};
pub use http::{Headers, HttpRequest, HttpResponse, Method};
pub use transport::Transport;
