// Transport - the single network round trip behind every resource call

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::{sync::Arc, time::Duration};

use crate::{
    config::ClientSettings,
    error::{Result, TransportResultExt},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_ACCEPT: &str = "application/json";

/// Status code and body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Performs one GET request per call; no retries, no pipelining
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, uri: &str) -> Result<TransportResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, uri: &str) -> Result<TransportResponse> {
        (**self).execute(uri).await
    }
}

/// reqwest-backed transport with a fixed timeout and Accept header
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_TIMEOUT, DEFAULT_ACCEPT)
    }

    pub fn with_options(timeout: Duration, accept: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str(accept).transport_err()?);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .transport_err()?;

        Ok(Self { client })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        Self::with_options(settings.timeout(), &settings.accept)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, uri: &str) -> Result<TransportResponse> {
        tracing::debug!(%uri, "GET");

        let response = self.client.get(uri).send().await.transport_err()?;
        let status = response.status().as_u16();
        let body = response.text().await.transport_err()?;

        tracing::debug!(%uri, status, bytes = body.len(), "Response received");
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_response_ok_only_for_200() {
        assert!(TransportResponse::new(200, "{}").is_ok());
        assert!(!TransportResponse::new(204, "").is_ok());
        assert!(!TransportResponse::new(500, "oops").is_ok());
    }

    #[test]
    fn test_invalid_accept_header_is_transport_error() {
        let result = HttpTransport::with_options(DEFAULT_TIMEOUT, "bad\nheader");
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let transport = HttpTransport::with_options(Duration::from_millis(500), DEFAULT_ACCEPT).unwrap();
        // Port 9 (discard) on localhost is expected to refuse the connection
        let result = transport.execute("http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
