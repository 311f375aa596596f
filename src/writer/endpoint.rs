//! Write endpoint and request construction.

use http::HeaderValue;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::config::{ApiVersion, ConfigError, Configuration};
use crate::transport::HttpRequest;

/// Timestamp precision requested from the v2 API. Not configurable.
pub const PRECISION: &str = "ns";

const V2_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
const V2_ACCEPT: &str = "application/json";

/// Builds the write endpoint for the given API.
///
/// Plain concatenation: `base_url` is used as-is and query values are not
/// percent-encoded, so callers keep full control over what is sent.
///
/// ```
/// use influx_writer::config::ApiVersion;
/// use influx_writer::writer::endpoint;
///
/// assert_eq!(
///     endpoint("http://h:8086", "db1", &ApiVersion::V1),
///     "http://h:8086/write?db=db1"
/// );
/// ```
#[must_use]
pub fn endpoint(base_url: &str, database: &str, api: &ApiVersion) -> String {
    match api {
        ApiVersion::V1 => format!("{base_url}/write?db={database}"),
        ApiVersion::V2 { org, .. } => format!(
            "{base_url}/api/v2/write?org={org}&bucket={database}&precision={PRECISION}"
        ),
    }
}

/// A write request ready to be sent.
#[derive(Debug, Clone)]
pub struct PreparedWrite {
    /// The endpoint exactly as constructed, before URL parsing
    pub endpoint: String,
    /// The request to send
    pub request: HttpRequest,
}

impl PreparedWrite {
    /// Builds the POST for `config` against `api`.
    ///
    /// The body is `config.data` byte for byte. v2 requests carry the token,
    /// accept and content-type headers; v1 requests carry none.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidUrl`] if the endpoint is not an absolute http(s) URL
    /// - [`ConfigError::InvalidHeaderValue`] if the token cannot be sent as a header
    pub fn build(config: &Configuration, api: &ApiVersion) -> Result<Self, ConfigError> {
        let endpoint = endpoint(&config.url, &config.database, api);
        let url = parse_target(&endpoint)?;

        let mut request = HttpRequest::post(url).with_body(config.data.as_bytes().to_vec());

        if let ApiVersion::V2 { token, .. } = api {
            let mut authorization =
                HeaderValue::from_str(&format!("token {token}")).map_err(|e| {
                    ConfigError::InvalidHeaderValue {
                        name: AUTHORIZATION.to_string(),
                        reason: e.to_string(),
                    }
                })?;
            authorization.set_sensitive(true);

            request = request
                .with_header(AUTHORIZATION, authorization)
                .with_header(ACCEPT, HeaderValue::from_static(V2_ACCEPT))
                .with_header(CONTENT_TYPE, HeaderValue::from_static(V2_CONTENT_TYPE));
        }

        Ok(Self { endpoint, request })
    }
}

fn parse_target(endpoint: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(endpoint).map_err(|e| ConfigError::InvalidUrl {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: endpoint.to_string(),
            reason: format!("unsupported scheme '{other}', expected http or https"),
        }),
    }
}
