//! The shared send-then-verify path used by [`Client`](crate::Client) and
//! [`Replica`](crate::Replica).

use std::sync::Arc;

use chronicle_core::{HttpRequest, Transport};
use serde_json::Value;
use tracing::debug;

use crate::error::ChronicleResult;
use crate::routes::{Route, Routes};
use crate::verifier::ResponseVerifier;

pub(crate) struct Dispatcher<T> {
    transport: Arc<T>,
    routes: Routes,
    verifier: ResponseVerifier,
}

impl<T: Transport> Dispatcher<T> {
    pub(crate) fn new(transport: Arc<T>, routes: Routes, verifier: ResponseVerifier) -> Self {
        Self {
            transport,
            routes,
            verifier,
        }
    }

    /// Same transport and key, scoped to replica `source`.
    pub(crate) fn replica(&self, source: String) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            routes: self.routes.replica(source),
            verifier: self.verifier,
        }
    }

    pub(crate) fn routes(&self) -> &Routes {
        &self.routes
    }

    pub(crate) fn verifier(&self) -> &ResponseVerifier {
        &self.verifier
    }

    pub(crate) fn url(&self, route: Route<'_>) -> ChronicleResult<String> {
        self.routes.url(route)
    }

    /// Unsigned GET of `route`.
    pub(crate) async fn get(&self, route: Route<'_>) -> ChronicleResult<Value> {
        let request = HttpRequest::get(self.url(route)?);
        self.execute(route, request).await
    }

    /// Send `request` and verify the response.
    pub(crate) async fn execute(
        &self,
        route: Route<'_>,
        request: HttpRequest,
    ) -> ChronicleResult<Value> {
        debug!(
            operation = route.name(),
            method = %request.method,
            url = %request.url,
            source = self.routes.source(),
            "Sending chronicle request"
        );

        let response = self.transport.send(request).await?;

        debug!(
            operation = route.name(),
            status = response.status,
            body_len = response.body.len(),
            "Received chronicle response"
        );

        self.verifier.verify_and_decode(&response)
    }
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.routes)
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}
