//! Blocking wrappers around the async [`Client`](crate::Client) and
//! [`Replica`](crate::Replica).
//!
//! Each wrapper owns a current-thread tokio runtime and drives the async
//! implementation to completion, so both calling conventions share one
//! protocol path. Called from inside another runtime, the call is moved to a
//! scoped thread and blocks the caller until it completes; async callers
//! should prefer the async types.
//!
//! ```rust,no_run
//! use chronicle_client::blocking::{self, Endpoint as _};
//! use chronicle_client::ClientConfig;
//!
//! # fn example() -> chronicle_client::ChronicleResult<()> {
//! let client = blocking::Client::http(&ClientConfig::new("https://chronicle.example.org"))?;
//! let head = client.last_hash()?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::sync::Arc;

use chronicle_core::Transport;
use chronicle_crypto::{KeyPair, PublicKey};
use serde_json::Value;
use tokio::runtime::{Builder, Handle, Runtime};
use url::Url;

use crate::config::ClientConfig;
use crate::endpoint::Endpoint as _;
use crate::error::ChronicleResult;
use crate::http::ReqwestTransport;
use crate::signer::Credentials;

/// Blocking counterpart of [`crate::Endpoint`].
pub trait Endpoint {
    /// `GET …/lasthash`.
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    fn last_hash(&self) -> ChronicleResult<Value>;

    /// `GET …/lookup/{hash}`.
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    fn lookup(&self, hash: &str) -> ChronicleResult<Value>;

    /// `GET …/since/{hash}`.
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    fn since(&self, hash: &str) -> ChronicleResult<Value>;

    /// `GET …/export`.
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    fn export(&self) -> ChronicleResult<Value>;
}

/// Current-thread runtime owned by a blocking client and its replicas.
struct Driver {
    runtime: Option<Runtime>,
}

impl Driver {
    fn new() -> ChronicleResult<Arc<Self>> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Arc::new(Self {
            runtime: Some(runtime),
        }))
    }

    /// Run `future` to completion.
    ///
    /// Inside an async context the current thread already has a runtime
    /// entered, so the future runs on a scoped thread instead of panicking.
    fn block_on<F>(&self, future: F) -> F::Output
    where
        F: Future + Send,
        F::Output: Send,
    {
        let Some(runtime) = &self.runtime else {
            unreachable!("runtime is only taken on drop");
        };
        if Handle::try_current().is_ok() {
            std::thread::scope(|s| {
                s.spawn(|| runtime.block_on(future))
                    .join()
                    .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
            })
        } else {
            runtime.block_on(future)
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        // Dropping a runtime inside an async context panics.
        if let Some(runtime) = self.runtime.take()
            && Handle::try_current().is_ok()
        {
            runtime.shutdown_background();
        }
    }
}

/// Blocking client for the primary ledger.
pub struct Client<T> {
    inner: crate::Client<T>,
    driver: Arc<Driver>,
}

impl<T: Transport> Client<T> {
    /// Wrap an async client.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Io`](crate::ChronicleError::Io) if the
    /// runtime cannot be started.
    pub fn new(inner: crate::Client<T>) -> ChronicleResult<Self> {
        Ok(Self {
            inner,
            driver: Driver::new()?,
        })
    }

    /// The wrapped async client.
    #[must_use]
    pub fn get_ref(&self) -> &crate::Client<T> {
        &self.inner
    }

    /// Unwrap into the async client.
    #[must_use]
    pub fn into_inner(self) -> crate::Client<T> {
        self.inner
    }

    /// See [`crate::Client::authenticate`].
    pub fn authenticate(&self, key: KeyPair, client_id: impl Into<String>) {
        self.inner.authenticate(key, client_id);
    }

    /// See [`crate::Client::authenticate_with`].
    pub fn authenticate_with(&self, credentials: Credentials) {
        self.inner.authenticate_with(credentials);
    }

    /// See [`crate::Client::clear_credentials`].
    pub fn clear_credentials(&self) {
        self.inner.clear_credentials();
    }

    /// See [`crate::Client::is_authenticated`].
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    /// See [`crate::Client::public_key`].
    #[must_use]
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.inner.public_key()
    }

    /// See [`crate::Client::base_url`].
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// See [`crate::Client::index`].
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    pub fn index(&self) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.index())
    }

    /// See [`crate::Client::replicas`].
    ///
    /// # Errors
    ///
    /// Transport or verification errors.
    pub fn replicas(&self) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.replicas())
    }

    /// See [`crate::Client::register`].
    ///
    /// # Errors
    ///
    /// Same as the async call.
    pub fn register(
        &self,
        public_key: &PublicKey,
        comment: Option<&str>,
    ) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.register(public_key, comment))
    }

    /// See [`crate::Client::revoke`].
    ///
    /// # Errors
    ///
    /// Same as the async call.
    pub fn revoke(&self, client_id: &str, public_key: &PublicKey) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.revoke(client_id, public_key))
    }

    /// See [`crate::Client::publish`].
    ///
    /// # Errors
    ///
    /// Same as the async call.
    pub fn publish(&self, message: impl Into<Vec<u8>> + Send) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.publish(message))
    }

    /// Blocking view of replica `source`, sharing this client's runtime.
    #[must_use]
    pub fn replica(&self, source: impl Into<String>) -> Replica<T> {
        Replica {
            inner: self.inner.replica(source),
            driver: Arc::clone(&self.driver),
        }
    }
}

impl Client<ReqwestTransport> {
    /// Blocking HTTP client, see [`crate::Client::http`].
    ///
    /// # Errors
    ///
    /// Config, HTTP client, or runtime construction errors.
    pub fn http(config: &ClientConfig) -> ChronicleResult<Self> {
        Self::new(crate::Client::http(config)?)
    }
}

impl<T: Transport> Endpoint for Client<T> {
    fn last_hash(&self) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.last_hash())
    }

    fn lookup(&self, hash: &str) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.lookup(hash))
    }

    fn since(&self, hash: &str) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.since(hash))
    }

    fn export(&self) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.export())
    }
}

impl<T> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::Client")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

/// Blocking replica view.
pub struct Replica<T> {
    inner: crate::Replica<T>,
    driver: Arc<Driver>,
}

impl<T: Transport> Replica<T> {
    /// Wrap an async replica.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Io`](crate::ChronicleError::Io) if the
    /// runtime cannot be started.
    pub fn new(inner: crate::Replica<T>) -> ChronicleResult<Self> {
        Ok(Self {
            inner,
            driver: Driver::new()?,
        })
    }

    /// The wrapped async replica.
    #[must_use]
    pub fn get_ref(&self) -> &crate::Replica<T> {
        &self.inner
    }

    /// See [`crate::Replica::source`].
    #[must_use]
    pub fn source(&self) -> &str {
        self.inner.source()
    }

    /// See [`crate::Replica::public_key`].
    #[must_use]
    pub fn public_key(&self) -> Option<&PublicKey> {
        self.inner.public_key()
    }
}

impl<T: Transport> Endpoint for Replica<T> {
    fn last_hash(&self) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.last_hash())
    }

    fn lookup(&self, hash: &str) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.lookup(hash))
    }

    fn since(&self, hash: &str) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.since(hash))
    }

    fn export(&self) -> ChronicleResult<Value> {
        self.driver.block_on(self.inner.export())
    }
}

impl<T> std::fmt::Debug for Replica<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("blocking::Replica")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}
