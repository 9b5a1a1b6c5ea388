//! Raw HTTP transport to a completion provider.
//!
//! A transport performs exactly one HTTP exchange and reports what came
//! back. Interpreting the status and body, timeouts and retries are the
//! job of [`CompletionClient`](super::client::CompletionClient).

use async_trait::async_trait;
use finchat_domain::CompletionRequest;
use thiserror::Error;

/// User agent sent with every provider request
pub const USER_AGENT: &str = concat!("finchat/", env!("CARGO_PKG_VERSION"));

/// Status and body of one provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors below the HTTP status level
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Whether repeating the same request could succeed
    pub fn is_transient(&self) -> bool {
        !matches!(self, TransportError::InvalidRequest(_))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_builder() {
            TransportError::InvalidRequest(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

/// One request/response exchange with a provider
#[async_trait]
pub trait ProviderTransport: Send + Sync {
    async fn send(&self, request: &CompletionRequest) -> Result<RawResponse, TransportError>;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}

/// Build the shared HTTP client used by all transports.
///
/// No client-level timeout is set; each attempt is bounded by the retry
/// policy's attempt timeout instead.
pub fn build_http_client() -> Result<reqwest::Client, TransportError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))
}

/// POST a JSON body with optional bearer auth and collect status and body.
pub(crate) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    api_key: Option<&str>,
    body: &serde_json::Value,
) -> Result<RawResponse, TransportError> {
    let mut builder = client.post(url).json(body);
    if let Some(key) = api_key {
        builder = builder.bearer_auth(key);
    }

    let response = builder.send().await?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Body(e.to_string()))?;

    Ok(RawResponse { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(301, "").is_success());
        assert!(!RawResponse::new(503, "").is_success());
    }

    #[test]
    fn test_invalid_request_is_not_transient() {
        assert!(TransportError::Timeout.is_transient());
        assert!(TransportError::Connect("refused".to_string()).is_transient());
        assert!(!TransportError::InvalidRequest("bad url".to_string()).is_transient());
    }
}
