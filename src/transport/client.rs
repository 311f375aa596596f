//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpRequest, HttpResponse, TransportError};
use crate::config::defaults;

/// Production HTTP client using reqwest.
///
/// Idle connections are never kept, so each write opens and closes its own
/// connection. Every request is bounded by a timeout (30 seconds unless
/// configured otherwise). TLS is used whenever the target scheme is `https`.
///
/// # Example
///
/// ```no_run
/// use influx_writer::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("http://localhost:8086/write?db=telegraf")?;
/// let request = HttpRequest::post(url).with_body(b"cpu value=1".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the default request timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(defaults::request_timeout())
    }

    /// Creates a client with the given request timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let inner = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });

        Self { inner }
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// Useful when you need custom configuration (proxies, TLS roots, etc.).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(map_send_error)?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_builder() {
        TransportError::InvalidUrl(e.to_string())
    } else {
        TransportError::Connection(Box::new(e))
    }
}
