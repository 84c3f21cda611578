//! The HTTP transport seam.
//!
//! The Chronicle client never talks to the network directly. Everything goes
//! through a [`Transport`], so the same signing and verification code runs over
//! reqwest in production and over an in-memory mock in tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportResult;
use crate::http::{HttpRequest, HttpResponse};

/// Sends one request and returns the raw response.
///
/// Implementations must hand back the body bytes untouched: the response
/// signature is checked against exactly those bytes. Retries, timeouts and
/// status-code policy are the implementation's business.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and wait for its response.
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        (**self).send(request).await
    }
}

/// Allows `Box<dyn Transport>` wherever `T: Transport` is required.
#[async_trait]
impl Transport for Box<dyn Transport> {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        (**self).send(request).await
    }
}
