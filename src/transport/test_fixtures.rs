//! Shared test fixtures for code that sends requests through [`HttpClient`].

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};

/// Mock HTTP client that returns a configurable sequence of responses.
#[derive(Debug)]
pub struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn status(status: http::StatusCode, body: &str) -> Self {
        Self::new(vec![Ok(HttpResponse::new(
            status,
            http::HeaderMap::new(),
            body.as_bytes().to_vec(),
        ))])
    }

    pub fn no_content() -> Self {
        Self::status(http::StatusCode::NO_CONTENT, "")
    }

    pub fn refused() -> Self {
        Self::new(vec![Err(TransportError::Connection(
            "connection refused".into(),
        ))])
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        self.responses.lock().unwrap().remove(0)
    }
}
