//! The read-only operations shared by the primary ledger and its replicas.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ChronicleResult;

/// Read operations available on every Chronicle endpoint.
///
/// None of these need client credentials. If a server public key is
/// configured, every response is verified before it is decoded.
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// `GET …/lasthash`: the hash of the most recent entry.
    async fn last_hash(&self) -> ChronicleResult<Value>;

    /// `GET …/lookup/{hash}`: the entry with the given hash.
    async fn lookup(&self, hash: &str) -> ChronicleResult<Value>;

    /// `GET …/since/{hash}`: every entry after the given hash.
    async fn since(&self, hash: &str) -> ChronicleResult<Value>;

    /// `GET …/export`: the full chain.
    async fn export(&self) -> ChronicleResult<Value>;
}

/// Allows `Box<dyn Endpoint>` wherever `E: Endpoint` is required.
#[async_trait]
impl Endpoint for Box<dyn Endpoint> {
    async fn last_hash(&self) -> ChronicleResult<Value> {
        (**self).last_hash().await
    }

    async fn lookup(&self, hash: &str) -> ChronicleResult<Value> {
        (**self).lookup(hash).await
    }

    async fn since(&self, hash: &str) -> ChronicleResult<Value> {
        (**self).since(hash).await
    }

    async fn export(&self) -> ChronicleResult<Value> {
        (**self).export().await
    }
}
