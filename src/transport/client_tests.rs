//! Tests for `ReqwestClient`.
//!
//! The request tests run against a one-shot TCP server on localhost that
//! records the raw request bytes and answers with a fixed response.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use super::*;

/// Accepts a single connection, captures the request and replies with `status_line`.
async fn serve_once(status_line: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let raw = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();

        raw
    });

    (addr, handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8(buf).unwrap()
}

fn local_client() -> ReqwestClient {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap();
    ReqwestClient::from_client(client)
}

mod construction {
    use super::*;

    #[test]
    fn new_creates_client() {
        let client = ReqwestClient::new();
        let _ = format!("{client:?}");
    }

    #[test]
    fn default_creates_same_as_new() {
        let client1 = ReqwestClient::new();
        let client2 = ReqwestClient::default();

        let _ = format!("{client1:?}");
        let _ = format!("{client2:?}");
    }

    #[test]
    fn with_timeout_creates_client() {
        let client = ReqwestClient::with_timeout(Duration::from_millis(250));
        assert!(format!("{client:?}").contains("ReqwestClient"));
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }
}

mod requests {
    use super::*;

    #[tokio::test]
    async fn sends_method_target_headers_and_body() {
        let (addr, server) = serve_once("204 No Content", "").await;
        let url = url::Url::parse(&format!("http://{addr}/write?db=db1")).unwrap();
        let request = HttpRequest::post(url)
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            )
            .with_body(b"cpu,host=a value=1 1603573200000000000".to_vec());

        let response = local_client().request(request).await.unwrap();
        let raw = server.await.unwrap();

        assert_eq!(response.status, http::StatusCode::NO_CONTENT);
        assert!(raw.starts_with("POST /write?db=db1 HTTP/1.1\r\n"), "{raw}");
        assert!(raw.to_ascii_lowercase().contains("accept: application/json\r\n"));
        assert!(raw.ends_with("\r\n\r\ncpu,host=a value=1 1603573200000000000"));
    }

    #[tokio::test]
    async fn returns_error_status_as_response() {
        let (addr, server) = serve_once("400 Bad Request", r#"{"error":"unable to parse"}"#).await;
        let url = url::Url::parse(&format!("http://{addr}/write?db=db1")).unwrap();

        let response = local_client()
            .request(HttpRequest::post(url).with_body(b"garbage".to_vec()))
            .await
            .unwrap();
        server.await.unwrap();

        assert_eq!(response.status, http::StatusCode::BAD_REQUEST);
        assert_eq!(response.body_text(), Some(r#"{"error":"unable to parse"}"#));
    }

    #[tokio::test]
    async fn refused_connection_returns_connection_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = url::Url::parse(&format!("http://{addr}/write?db=db1")).unwrap();
        let result = local_client().request(HttpRequest::post(url)).await;

        assert!(
            matches!(result, Err(TransportError::Connection(_))),
            "got {result:?}"
        );
    }

    #[tokio::test]
    async fn silent_server_returns_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();
        let url = url::Url::parse(&format!("http://{addr}/write?db=db1")).unwrap();
        let result = ReqwestClient::from_client(client)
            .request(HttpRequest::post(url))
            .await;

        assert!(matches!(result, Err(TransportError::Timeout)), "got {result:?}");
    }
}
