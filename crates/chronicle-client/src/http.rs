//! HTTP transport backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use chronicle_core::{
    Headers, HttpRequest, HttpResponse, Method, Transport, TransportError, TransportResult,
};
use tracing::{error, trace};

use crate::config::ClientConfig;
use crate::error::{ChronicleError, ChronicleResult};

/// [`Transport`] that sends requests over HTTP(S) with a shared
/// [`reqwest::Client`].
///
/// Non-success statuses are reported as [`TransportError::Status`] and never
/// reach response verification.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport with reqwest's default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing reqwest client (custom TLS, proxies, pools).
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a transport honoring the config's timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`ChronicleError::Config`] if reqwest rejects the settings.
    pub fn from_config(config: &ClientConfig) -> ChronicleResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let client = builder
            .build()
            .map_err(|e| ChronicleError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

fn classify(e: &reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::InvalidRequest(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let resp = builder.send().await.map_err(|e| classify(&e))?;

        let status = resp.status();
        let headers: Headers = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| TransportError::Request(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&body).into_owned();
            error!(url = %request.url, status = status.as_u16(), "Chronicle request failed");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        trace!(url = %request.url, headers = headers.len(), "Chronicle response headers");
        Ok(HttpResponse::new(status.as_u16(), headers, body.to_vec()))
    }
}
