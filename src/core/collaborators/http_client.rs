//! Outbound HTTP capability.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors raised by the HTTP collaborator.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Failed to connect: {0}")]
    Connect(String),

    #[error("Network error: {0}")]
    Request(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),
}

/// Minimal GET-only HTTP client.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout_ms: u64,
    ) -> Result<HttpResponse, HttpError>;
}

/// [`HttpClient`] backed by `reqwest`.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client }
    }

    fn classify(err: reqwest::Error, timeout_ms: u64) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(timeout_ms)
        } else if err.is_connect() {
            HttpError::Connect(err.to_string())
        } else {
            HttpError::Request(err.to_string())
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout_ms: u64,
    ) -> Result<HttpResponse, HttpError> {
        let mut request = self
            .client
            .get(url)
            .timeout(Duration::from_millis(timeout_ms));
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| {
            warn!("GET request failed: {}", e);
            Self::classify(e, timeout_ms)
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Self::classify(e, timeout_ms))?;

        info!("GET completed with status {}", status);
        Ok(HttpResponse { status, body })
    }
}
