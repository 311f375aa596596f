//! HTTP request/response types and the client trait.

use super::TransportError;

/// An outbound HTTP request.
///
/// Built by the writer and handed to any [`HttpClient`]. Method and headers
/// use the `http` crate types so the value is independent of the client library.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method
    pub method: http::Method,
    /// Request target
    pub url: url::Url,
    /// Headers to send in addition to the client's defaults
    pub headers: http::HeaderMap,
    /// Request body, sent verbatim
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Sets the request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header, keeping any existing values for the same name.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Returns the body as UTF-8 text, if present and valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|body| std::str::from_utf8(body).ok())
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one HTTP request and returns the response.
///
/// This is the seam between the writer and the network. Tests inject mock
/// clients that capture requests; production uses [`super::ReqwestClient`].
///
/// # Example
///
/// ```ignore
/// use influx_writer::transport::{HttpClient, HttpRequest, HttpResponse, TransportError};
///
/// struct NoContent;
///
/// impl HttpClient for NoContent {
///     async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, TransportError> {
///         Ok(HttpResponse::new(
///             http::StatusCode::NO_CONTENT,
///             http::HeaderMap::new(),
///             Vec::new(),
///         ))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no response was obtained:
    /// - the connection could not be established or broke ([`TransportError::Connection`])
    /// - the timeout elapsed ([`TransportError::Timeout`])
    /// - the request target is unusable ([`TransportError::InvalidUrl`])
    ///
    /// Non-2xx responses are returned as `Ok`.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpClient> HttpClient for std::sync::Arc<T> {
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).request(req)
    }
}
