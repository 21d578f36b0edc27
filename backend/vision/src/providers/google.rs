use async_trait::async_trait;
use glimpse_core::AnalysisError;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use super::VisionTransport;
use crate::request::AnnotateRequest;

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

/// Google Cloud Vision `images:annotate` over HTTPS, keyed by query parameter.
pub struct GoogleVisionTransport {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl GoogleVisionTransport {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VisionTransport for GoogleVisionTransport {
    fn name(&self) -> &str {
        "google"
    }

    async fn annotate(&self, request: &AnnotateRequest) -> Result<Value, AnalysisError> {
        info!(endpoint = %self.endpoint, "[Vision] Annotating image via Google Cloud Vision");

        // The key travels in the URL; keep it out of error strings.
        let resp = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(e.without_url().to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "Vision API responded");

        if !status.is_success() {
            return Err(AnalysisError::HttpStatus { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| AnalysisError::MalformedResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FeatureLimits, build_request};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request text.
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (format!("http://{addr}/v1/images:annotate"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(head_end) = text.find("\r\n\r\n") else { return false };
        let content_length = text[..head_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        raw.len() >= head_end + 4 + content_length
    }

    #[tokio::test]
    async fn posts_json_with_key_query() {
        let (url, server) = one_shot_server("200 OK", r#"{"responses":[{}]}"#).await;
        let transport = GoogleVisionTransport::new("test-key").with_endpoint(url);
        let request = build_request("data:image/png;base64,QUJD", &FeatureLimits::default());

        let value = transport.annotate(&request).await.unwrap();
        assert_eq!(value["responses"][0], serde_json::json!({}));

        let seen = server.await.unwrap();
        assert!(seen.starts_with("POST /v1/images:annotate?key=test-key "));
        assert!(seen.contains(r#""content":"QUJD""#));
        assert!(seen.contains("TEXT_DETECTION"));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let (url, server) = one_shot_server("403 Forbidden", r#"{"error":{"message":"API key not valid"}}"#).await;
        let transport = GoogleVisionTransport::new("bad").with_endpoint(url);
        let err = transport
            .annotate(&build_request("QUJD", &FeatureLimits::default()))
            .await
            .unwrap_err();
        match err {
            AnalysisError::HttpStatus { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn non_json_body_is_malformed() {
        let (url, server) = one_shot_server("200 OK", "<html>oops</html>").await;
        let transport = GoogleVisionTransport::new("k").with_endpoint(url);
        let err = transport
            .annotate(&build_request("QUJD", &FeatureLimits::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error_without_key() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = GoogleVisionTransport::new("secret-key").with_endpoint(format!("http://{addr}/"));
        let err = transport
            .annotate(&build_request("QUJD", &FeatureLimits::default()))
            .await
            .unwrap_err();
        match err {
            AnalysisError::Transport(msg) => assert!(!msg.contains("secret-key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
