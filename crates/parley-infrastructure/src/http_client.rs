//! reqwest-backed implementation of the `ApiClient` port.
//!
//! The session is carried by an HTTP-only cookie the backend sets on login,
//! so the client keeps a cookie store and sends it back on every request.

use async_trait::async_trait;
use parley_core::config::ClientConfig;
use parley_core::{ApiClient, ApiError, HttpMethod, ParleyError};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;

pub struct ReqwestApiClient {
    client: Client,
    config: ClientConfig,
}

impl ReqwestApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ParleyError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| ParleyError::config(format!("Failed to build HTTP client: {e}")))?;

        tracing::info!(
            base_url = config.base_url(),
            timeout_secs = config.timeout().as_secs(),
            "[Api] HTTP client ready"
        );

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl ApiClient for ReqwestApiClient {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        let url = self.config.endpoint(path);
        tracing::debug!("[Api] {} {}", method, url);

        let mut builder = self.client.request(to_reqwest_method(method), &url);
        if let Some(body) = body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| transport_error(method, &url, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(method, &url, e))?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &text);
            tracing::debug!(
                status = status.as_u16(),
                server_message = err.server_message().unwrap_or_default(),
                "[Api] {} {} failed",
                method,
                url
            );
            return Err(err);
        }

        Ok(parse_body(&text))
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
    }
}

fn transport_error(method: HttpMethod, url: &str, err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        tracing::warn!("[Api] {} {} timed out", method, url);
        ApiError::timeout(err.to_string())
    } else {
        tracing::warn!("[Api] {} {} transport error: {}", method, url, err);
        ApiError::network(err.to_string())
    }
}

/// Empty bodies become `null`; bodies that are not JSON are kept as strings.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::ApiErrorKind;
    use serde_json::json;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    #[derive(Debug, Clone)]
    struct CapturedRequest {
        method: String,
        path: String,
        headers: Vec<(String, String)>,
        body: String,
    }

    impl CapturedRequest {
        fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    fn response(status: &str, extra_headers: &[&str], body: &str) -> String {
        let mut head = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n",
            body.len()
        );
        for header in extra_headers {
            head.push_str(header);
            head.push_str("\r\n");
        }
        format!("{head}\r\n{body}")
    }

    async fn read_request(stream: &mut TcpStream) -> CapturedRequest {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers were read");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let mut lines = head.split("\r\n");
        let request_line = lines.next().unwrap_or_default();
        let mut parts = request_line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();
        let headers: Vec<(String, String)> = lines
            .filter_map(|line| line.split_once(':'))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();

        let content_length = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, v)| v.parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

        CapturedRequest {
            method,
            path,
            headers,
            body,
        }
    }

    /// Answers one connection per scripted response, in order.
    async fn serve(responses: Vec<String>) -> (SocketAddr, JoinHandle<Vec<CapturedRequest>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let mut captured = Vec::new();
            for reply in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                captured.push(read_request(&mut stream).await);
                stream.write_all(reply.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            }
            captured
        });
        (addr, handle)
    }

    fn client_for(addr: SocketAddr) -> ReqwestApiClient {
        ReqwestApiClient::new(ClientConfig::new(format!("http://{addr}"))).unwrap()
    }

    #[tokio::test]
    async fn test_post_sends_json_to_api_path() {
        let (addr, server) = serve(vec![response(
            "201 Created",
            &["Content-Type: application/json"],
            r#"{"_id":"u1","fullName":"Ada"}"#,
        )])
        .await;
        let client = client_for(addr);

        let value = client
            .request(
                HttpMethod::Post,
                "/auth/signup",
                Some(json!({"email": "ada@example.com"})),
            )
            .await
            .unwrap();

        assert_eq!(value["_id"], "u1");
        let captured = server.await.unwrap();
        assert_eq!(captured[0].method, "POST");
        assert_eq!(captured[0].path, "/api/auth/signup");
        assert_eq!(captured[0].header("content-type"), Some("application/json"));
        let sent: Value = serde_json::from_str(&captured[0].body).unwrap();
        assert_eq!(sent["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_error_status_carries_server_message() {
        let (addr, server) = serve(vec![response(
            "401 Unauthorized",
            &["Content-Type: application/json"],
            r#"{"message":"Unauthorized - No Token Provided"}"#,
        )])
        .await;
        let client = client_for(addr);

        let err = client
            .request(HttpMethod::Get, "/auth/check", None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::Status);
        assert!(err.is_unauthorized());
        assert_eq!(err.server_message(), Some("Unauthorized - No Token Provided"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_and_plain_text_bodies() {
        let (addr, server) = serve(vec![
            response("200 OK", &[], ""),
            response("200 OK", &["Content-Type: text/plain"], "logged out"),
        ])
        .await;
        let client = client_for(addr);

        let empty = client.request(HttpMethod::Post, "/auth/logout", None).await.unwrap();
        let text = client.request(HttpMethod::Post, "/auth/logout", None).await.unwrap();

        assert_eq!(empty, Value::Null);
        assert_eq!(text, Value::String("logged out".to_string()));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_session_cookie_is_sent_back() {
        let (addr, server) = serve(vec![
            response("200 OK", &["Set-Cookie: jwt=token123; Path=/; HttpOnly"], "{}"),
            response("200 OK", &[], "{}"),
        ])
        .await;
        let client = client_for(addr);

        client.request(HttpMethod::Post, "/auth/login", None).await.unwrap();
        client.request(HttpMethod::Get, "/auth/check", None).await.unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured[1].header("cookie"), Some("jwt=token123"));
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            drop(stream);
        });

        let config =
            ClientConfig::new(format!("http://{addr}")).with_timeout(Duration::from_millis(200));
        let client = ReqwestApiClient::new(config).unwrap();

        let err = client
            .request(HttpMethod::Get, "/messages/users", None)
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
        server.abort();
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let client = client_for(addr);

        let err = client
            .request(HttpMethod::Get, "/auth/check", None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ApiErrorKind::Network);
        assert_eq!(err.status(), None);
    }
}
