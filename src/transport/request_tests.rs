//! Tests for HTTP request/response types.

use super::{HttpRequest, HttpResponse};

fn write_url() -> url::Url {
    url::Url::parse("http://influxdb:8086/write?db=telegraf").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let req = HttpRequest::new(http::Method::PUT, write_url());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, write_url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn post_creates_post_request() {
        let req = HttpRequest::post(write_url());

        assert_eq!(req.method, http::Method::POST);
    }

    #[test]
    fn with_body_keeps_bytes_verbatim() {
        let body = b"cpu value=1\nmem value=2\n".to_vec();
        let req = HttpRequest::post(write_url()).with_body(body.clone());

        assert_eq!(req.body, Some(body));
        assert_eq!(req.body_text(), Some("cpu value=1\nmem value=2\n"));
    }

    #[test]
    fn body_text_is_none_without_body() {
        assert_eq!(HttpRequest::post(write_url()).body_text(), None);
    }

    #[test]
    fn with_header_appends_multiple_values_for_same_name() {
        let req = HttpRequest::post(write_url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/plain"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn url_query_is_preserved() {
        let url = url::Url::parse("http://h:8086/api/v2/write?org=o1&bucket=b1&precision=ns")
            .unwrap();
        let req = HttpRequest::post(url);

        assert_eq!(
            req.url.as_str(),
            "http://h:8086/api/v2/write?org=o1&bucket=b1&precision=ns"
        );
    }
}

mod http_response {
    use super::*;

    #[test]
    fn new_creates_response_with_all_fields() {
        let resp = HttpResponse::new(
            http::StatusCode::NO_CONTENT,
            http::HeaderMap::new(),
            Vec::new(),
        );

        assert_eq!(resp.status, http::StatusCode::NO_CONTENT);
        assert!(resp.headers.is_empty());
        assert!(resp.body.is_empty());
    }

    #[test]
    fn body_text_returns_valid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::BAD_REQUEST,
            http::HeaderMap::new(),
            br#"{"error":"partial write"}"#.to_vec(),
        );

        assert_eq!(resp.body_text(), Some(r#"{"error":"partial write"}"#));
    }

    #[test]
    fn body_text_returns_none_for_invalid_utf8() {
        let resp = HttpResponse::new(http::StatusCode::OK, http::HeaderMap::new(), vec![0xff, 0xfe]);

        assert_eq!(resp.body_text(), None);
    }

    #[test]
    fn body_lossy_replaces_invalid_utf8() {
        let resp = HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            vec![b'o', b'k', 0xff],
        );

        assert_eq!(resp.body_lossy(), "ok\u{fffd}");
    }
}
