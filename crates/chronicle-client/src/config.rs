//! Client configuration.
//!
//! A config names the ledger and, optionally, the server key to verify
//! responses against. It can be built in code or loaded from TOML:
//!
//! ```toml
//! base_url = "https://chronicle.example.org"
//! public_key = "uW197cTmhf0MGDZU-NtWr1bsQ-MxSCzFa64mbjjl4MQ="
//! client_id = "my-client"
//! timeout_secs = 30
//! ```

use std::path::Path;

use chronicle_crypto::{KeyPair, PublicKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ChronicleError, ChronicleResult};
use crate::routes::Routes;
use crate::signer::Credentials;

/// Configuration for a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Ledger base URL; API paths are appended under `/chronicle`.
    pub base_url: String,
    /// Server public key (URL-safe base64). Without it responses are not verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<PublicKey>,
    /// Client identity registered with the ledger, used for signed writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    /// `User-Agent` sent by the HTTP transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Whole-request timeout applied by the HTTP transport.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Create a config for `base_url` with verification disabled.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            public_key: None,
            client_id: None,
            user_agent: None,
            timeout_secs: None,
        }
    }

    /// Verify responses against `public_key`.
    #[must_use]
    pub fn with_public_key(mut self, public_key: PublicKey) -> Self {
        self.public_key = Some(public_key);
        self
    }

    /// Set the client identity.
    #[must_use]
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the transport timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Config`] on malformed TOML, unknown fields,
    /// a bad public key, or a config that fails [`ClientConfig::validate`].
    pub fn from_toml_str(s: &str) -> ChronicleResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| ChronicleError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Io`] if the file cannot be read, or any error
    /// from [`ClientConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> ChronicleResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), base_url = %config.base_url, "Loaded client config");
        Ok(config)
    }

    /// Check the config for values the client cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::InvalidBaseUrl`] for an unusable base URL and
    /// [`ChronicleError::Config`] for an empty client id or a zero timeout.
    pub fn validate(&self) -> ChronicleResult<()> {
        Routes::new(&self.base_url)?;
        if self.client_id.as_deref().is_some_and(str::is_empty) {
            return Err(ChronicleError::Config("client_id must not be empty".into()));
        }
        if self.timeout_secs == Some(0) {
            return Err(ChronicleError::Config(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Pair `key` with the configured client identity.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Config`] if no `client_id` is configured.
    pub fn credentials(&self, key: KeyPair) -> ChronicleResult<Credentials> {
        let client_id = self
            .client_id
            .as_deref()
            .ok_or_else(|| ChronicleError::Config("no client_id configured".into()))?;
        Ok(Credentials::new(key, client_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVER_KEY: &str = "uW197cTmhf0MGDZU-NtWr1bsQ-MxSCzFa64mbjjl4MQ=";

    #[test]
    fn test_minimal_toml() {
        let config = ClientConfig::from_toml_str(r#"base_url = "http://ledger.test""#).unwrap();
        assert_eq!(config, ClientConfig::new("http://ledger.test"));
    }

    #[test]
    fn test_full_toml() {
        let config = ClientConfig::from_toml_str(&format!(
            r#"
            base_url = "https://chronicle.example.org"
            public_key = "{SERVER_KEY}"
            client_id = "my-client"
            user_agent = "chronicle-client/test"
            timeout_secs = 30
            "#
        ))
        .unwrap();

        assert_eq!(
            config.public_key,
            Some(PublicKey::from_base64(SERVER_KEY).unwrap())
        );
        assert_eq!(config.client_id.as_deref(), Some("my-client"));
        assert_eq!(config.user_agent.as_deref(), Some("chronicle-client/test"));
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = ClientConfig::from_toml_str(
            r#"
            base_url = "http://ledger.test"
            retries = 3
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ChronicleError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_public_key() {
        let err = ClientConfig::from_toml_str(
            r#"
            base_url = "http://ledger.test"
            public_key = "dG9vLXNob3J0"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ChronicleError::Config(_)));
    }

    #[test]
    fn test_validate() {
        assert!(matches!(
            ClientConfig::new("nope").validate(),
            Err(ChronicleError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("http://ledger.test")
                .with_client_id("")
                .validate(),
            Err(ChronicleError::Config(_))
        ));
        assert!(matches!(
            ClientConfig::new("http://ledger.test")
                .with_timeout_secs(0)
                .validate(),
            Err(ChronicleError::Config(_))
        ));
        assert!(
            ClientConfig::new("http://ledger.test")
                .with_user_agent("ua")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chronicle.toml");
        std::fs::write(
            &path,
            "base_url = \"http://ledger.test\"\nclient_id = \"client\"\n",
        )
        .unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.client_id.as_deref(), Some("client"));

        let missing = ClientConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ChronicleError::Io(_)));
    }

    #[test]
    fn test_credentials_from_config() {
        let config = ClientConfig::new("http://ledger.test").with_client_id("client");
        let creds = config.credentials(KeyPair::generate()).unwrap();
        assert_eq!(creds.client_id(), "client");

        let err = ClientConfig::new("http://ledger.test")
            .credentials(KeyPair::generate())
            .unwrap_err();
        assert!(matches!(err, ChronicleError::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_key() {
        let key = PublicKey::from_base64(SERVER_KEY).unwrap();
        let config = ClientConfig::new("http://ledger.test").with_public_key(key);
        let encoded = toml::to_string(&config).unwrap();
        assert_eq!(ClientConfig::from_toml_str(&encoded).unwrap(), config);
    }
}
