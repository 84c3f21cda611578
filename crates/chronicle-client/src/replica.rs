//! Read-only views of upstream ledgers mirrored by the Chronicle service.

use std::sync::Arc;

use async_trait::async_trait;
use chronicle_core::Transport;
use chronicle_crypto::PublicKey;
use serde_json::Value;

use crate::dispatch::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::ChronicleResult;
use crate::routes::{Route, Routes};
use crate::verifier::ResponseVerifier;

/// A replica of an upstream ledger, addressed via `/chronicle/replica/{source}`.
///
/// Replicas are mirrors: they expose only the [`Endpoint`] reads and never
/// sign requests. Responses are verified with the same rule as the primary
/// client.
pub struct Replica<T> {
    dispatcher: Dispatcher<T>,
}

impl<T: Transport> Replica<T> {
    /// Create a replica view directly.
    ///
    /// Usually obtained through [`Client::replica`](crate::Client::replica).
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::InvalidBaseUrl`](crate::ChronicleError::InvalidBaseUrl)
    /// if `base_url` cannot carry API paths.
    pub fn new(
        transport: Arc<T>,
        base_url: &str,
        source: impl Into<String>,
        public_key: Option<PublicKey>,
    ) -> ChronicleResult<Self> {
        let routes = Routes::new(base_url)?.replica(source);
        Ok(Self::from_dispatcher(Dispatcher::new(
            transport,
            routes,
            ResponseVerifier::new(public_key),
        )))
    }

    pub(crate) fn from_dispatcher(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    /// The upstream source this replica addresses.
    #[must_use]
    pub fn source(&self) -> &str {
        self.dispatcher.routes().source().unwrap_or_default()
    }

    /// The server public key responses are verified against.
    #[must_use]
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.dispatcher.verifier().public_key()
    }
}

#[async_trait]
impl<T: Transport> Endpoint for Replica<T> {
    async fn last_hash(&self) -> ChronicleResult<Value> {
        self.dispatcher.get(Route::LastHash).await
    }

    async fn lookup(&self, hash: &str) -> ChronicleResult<Value> {
        self.dispatcher.get(Route::Lookup(hash)).await
    }

    async fn since(&self, hash: &str) -> ChronicleResult<Value> {
        self.dispatcher.get(Route::Since(hash)).await
    }

    async fn export(&self) -> ChronicleResult<Value> {
        self.dispatcher.get(Route::Export).await
    }
}

impl<T> std::fmt::Debug for Replica<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Replica")
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
