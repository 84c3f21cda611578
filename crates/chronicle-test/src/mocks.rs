//! Mock implementations for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::trace;

use chronicle_core::{HttpRequest, HttpResponse, Transport, TransportError, TransportResult};

/// Scripted [`Transport`] that records every request it is given.
///
/// Responses are served in the order they were queued. When the queue is
/// empty the default response is cloned if one is set, otherwise the send
/// fails with [`TransportError::Request`].
///
/// Uses `std::sync::Mutex` internally so it can be scripted without a
/// tokio runtime.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    /// Queued results.
    responses: Arc<Mutex<VecDeque<TransportResult<HttpResponse>>>>,
    /// Served when the queue is empty.
    default_response: Option<HttpResponse>,
    /// Requests seen so far.
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    /// Create a mock with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response (builder form).
    #[must_use]
    pub fn with_response(self, response: HttpResponse) -> Self {
        self.push_response(response);
        self
    }

    /// Serve `response` whenever the queue is empty.
    #[must_use]
    pub fn with_default_response(mut self, response: HttpResponse) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Queue a response.
    pub fn push_response(&self, response: HttpResponse) {
        if let Ok(mut guard) = self.responses.lock() {
            guard.push_back(Ok(response));
        }
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: TransportError) {
        if let Ok(mut guard) = self.responses.lock() {
            guard.push_back(Err(error));
        }
    }

    /// Every request sent through this mock, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// The most recent request.
    #[must_use]
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .ok()
            .and_then(|guard| guard.last().cloned())
    }

    /// Number of requests sent.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Number of queued results not yet served.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.responses.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> TransportResult<HttpResponse> {
        trace!(method = %request.method, url = %request.url, "MockTransport request");
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request);
        }

        let next = self
            .responses
            .lock()
            .ok()
            .and_then(|mut guard| guard.pop_front());
        match next {
            Some(result) => result,
            None => self.default_response.clone().ok_or_else(|| {
                TransportError::Request("MockTransport: no response queued".to_string())
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_in_order_and_records() {
        let mock = MockTransport::new()
            .with_response(HttpResponse::ok("first"))
            .with_response(HttpResponse::ok("second"));

        let a = mock.send(HttpRequest::get("http://a")).await.unwrap();
        let b = mock.send(HttpRequest::post("http://b", "x")).await.unwrap();

        assert_eq!(a.body, b"first");
        assert_eq!(b.body, b"second");
        assert_eq!(mock.request_count(), 2);
        assert_eq!(mock.last_request().unwrap().url, "http://b");
        assert_eq!(mock.pending(), 0);
    }

    #[tokio::test]
    async fn test_empty_queue_fails() {
        let mock = MockTransport::new();
        let err = mock.send(HttpRequest::get("http://a")).await.unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
        assert_eq!(mock.request_count(), 1);
    }

    #[tokio::test]
    async fn test_default_response() {
        let mock = MockTransport::new().with_default_response(HttpResponse::ok("[]"));
        for _ in 0..3 {
            assert_eq!(mock.send(HttpRequest::get("http://a")).await.unwrap().body, b"[]");
        }
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockTransport::new();
        mock.push_error(TransportError::Status {
            status: 503,
            body: "down".into(),
        });
        let err = mock.send(HttpRequest::get("http://a")).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 503, .. }));
    }

    #[test]
    fn test_clones_share_state() {
        let mock = MockTransport::new();
        let clone = mock.clone();
        clone.push_response(HttpResponse::ok("x"));
        assert_eq!(mock.pending(), 1);
    }
}
