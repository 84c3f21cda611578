//! The primary ledger client.

use std::sync::Arc;

use async_trait::async_trait;
use chronicle_core::Transport;
use chronicle_crypto::{KeyPair, PublicKey};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use url::Url;

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::endpoint::Endpoint;
use crate::error::ChronicleResult;
use crate::http::ReqwestTransport;
use crate::replica::Replica;
use crate::routes::{Route, Routes};
use crate::signer::{CredentialSlot, Credentials, RequestSigner, WriteBody};
use crate::verifier::ResponseVerifier;

#[derive(Serialize)]
struct RegisterBody<'a> {
    publickey: String,
    comment: Option<&'a str>,
}

#[derive(Serialize)]
struct RevokeBody<'a> {
    clientid: &'a str,
    publickey: String,
}

/// Client for the primary Chronicle ledger.
///
/// Reads are available immediately through [`Endpoint`]. Writes (`register`,
/// `revoke`, `publish`) are signed and require [`Client::authenticate`] first;
/// without credentials they fail with
/// [`ChronicleError::Unauthenticated`](crate::ChronicleError::Unauthenticated)
/// before anything is sent.
///
/// # Example
///
/// ```rust,no_run
/// use chronicle_client::prelude::*;
///
/// # async fn example() -> ChronicleResult<()> {
/// let server_key = PublicKey::from_base64("uW197cTmhf0MGDZU-NtWr1bsQ-MxSCzFa64mbjjl4MQ=")?;
/// let config = ClientConfig::new("https://chronicle.example.org").with_public_key(server_key);
/// let client = Client::http(&config)?;
///
/// let head = client.last_hash().await?;
/// println!("head: {head}");
///
/// client.authenticate(KeyPair::generate(), "my-client");
/// client.publish("hello ledger").await?;
/// # Ok(())
/// # }
/// ```
pub struct Client<T> {
    dispatcher: Dispatcher<T>,
    credentials: CredentialSlot,
}

impl<T: Transport> Client<T> {
    /// Create a client for `base_url`.
    ///
    /// Pass the server's public key to verify every response, or `None` to
    /// accept responses unchecked.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::InvalidBaseUrl`](crate::ChronicleError::InvalidBaseUrl)
    /// if `base_url` cannot carry API paths.
    pub fn new(
        transport: T,
        base_url: &str,
        public_key: Option<PublicKey>,
    ) -> ChronicleResult<Self> {
        Self::with_shared_transport(Arc::new(transport), base_url, public_key)
    }

    /// Like [`Client::new`], for a transport that is shared with other owners.
    ///
    /// # Errors
    ///
    /// Same as [`Client::new`].
    pub fn with_shared_transport(
        transport: Arc<T>,
        base_url: &str,
        public_key: Option<PublicKey>,
    ) -> ChronicleResult<Self> {
        let routes = Routes::new(base_url)?;
        info!(
            base_url = %routes.base_url(),
            verify = public_key.is_some(),
            key_id = ?public_key.map(|k| k.key_id_hex()),
            "Created chronicle client"
        );
        Ok(Self {
            dispatcher: Dispatcher::new(transport, routes, ResponseVerifier::new(public_key)),
            credentials: CredentialSlot::new(),
        })
    }

    /// Create a client from a validated [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation.
    pub fn from_config(config: &ClientConfig, transport: T) -> ChronicleResult<Self> {
        config.validate()?;
        Self::new(transport, &config.base_url, config.public_key)
    }

    /// Set the signing key and client identity used for writes.
    ///
    /// Produces no network traffic. Calling it again rotates the credentials;
    /// writes already in flight keep the pair they started with.
    pub fn authenticate(&self, key: KeyPair, client_id: impl Into<String>) {
        self.authenticate_with(Credentials::new(key, client_id));
    }

    /// Set pre-built [`Credentials`].
    pub fn authenticate_with(&self, credentials: Credentials) {
        info!(
            client_id = credentials.client_id(),
            key_id = %credentials.key().key_id_hex(),
            "Chronicle credentials set"
        );
        self.credentials.set(credentials);
    }

    /// Forget the current credentials.
    pub fn clear_credentials(&self) {
        self.credentials.clear();
    }

    /// Whether writes are currently possible.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_set()
    }

    /// The server public key responses are verified against.
    #[must_use]
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.dispatcher.verifier().public_key()
    }

    /// The configured ledger base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.dispatcher.routes().base_url()
    }

    /// `GET /chronicle`: service index.
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    pub async fn index(&self) -> ChronicleResult<Value> {
        self.dispatcher.get(Route::Index).await
    }

    /// `GET /chronicle/replica`: the replicas this ledger mirrors.
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    pub async fn replicas(&self) -> ChronicleResult<Value> {
        self.dispatcher.get(Route::Replicas).await
    }

    /// `POST /chronicle/register`: register a new client public key.
    ///
    /// # Errors
    ///
    /// [`ChronicleError::Unauthenticated`](crate::ChronicleError::Unauthenticated)
    /// without credentials, otherwise transport or verification errors.
    pub async fn register(
        &self,
        public_key: &PublicKey,
        comment: Option<&str>,
    ) -> ChronicleResult<Value> {
        let credentials = self.credentials.require()?;
        let body = WriteBody::json(&RegisterBody {
            publickey: public_key.to_base64(),
            comment,
        })?;
        self.signed_write(Route::Register, body, &credentials).await
    }

    /// `POST /chronicle/revoke`: revoke a client's public key.
    ///
    /// # Errors
    ///
    /// [`ChronicleError::Unauthenticated`](crate::ChronicleError::Unauthenticated)
    /// without credentials, otherwise transport or verification errors.
    pub async fn revoke(&self, client_id: &str, public_key: &PublicKey) -> ChronicleResult<Value> {
        let credentials = self.credentials.require()?;
        let body = WriteBody::json(&RevokeBody {
            clientid: client_id,
            publickey: public_key.to_base64(),
        })?;
        self.signed_write(Route::Revoke, body, &credentials).await
    }

    /// `POST /chronicle/publish`: append `message` to the ledger.
    ///
    /// The message is sent as the raw body, not wrapped in JSON.
    ///
    /// # Errors
    ///
    /// [`ChronicleError::Unauthenticated`](crate::ChronicleError::Unauthenticated)
    /// without credentials, otherwise transport or verification errors.
    pub async fn publish(&self, message: impl Into<Vec<u8>> + Send) -> ChronicleResult<Value> {
        let credentials = self.credentials.require()?;
        let body = WriteBody::Raw(message.into());
        self.signed_write(Route::Publish, body, &credentials).await
    }

    /// A read-only view of replica `source`.
    ///
    /// The replica shares this client's transport and base URL and carries a
    /// copy of its server public key. It never signs anything.
    #[must_use]
    pub fn replica(&self, source: impl Into<String>) -> Replica<T> {
        Replica::from_dispatcher(self.dispatcher.replica(source.into()))
    }

    async fn signed_write(
        &self,
        route: Route<'_>,
        body: WriteBody,
        credentials: &Credentials,
    ) -> ChronicleResult<Value> {
        let request = RequestSigner::signed_post(self.dispatcher.url(route)?, body, credentials);
        self.dispatcher.execute(route, request).await
    }
}

impl Client<ReqwestTransport> {
    /// Create a client over HTTP(S) using reqwest.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client cannot be built.
    pub fn http(config: &ClientConfig) -> ChronicleResult<Self> {
        let transport = ReqwestTransport::from_config(config)?;
        Self::from_config(config, transport)
    }
}

#[async_trait]
impl<T: Transport> Endpoint for Client<T> {
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

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("dispatcher", &self.dispatcher)
            .field("authenticated", &self.credentials.is_set())
            .finish()
    }
}
