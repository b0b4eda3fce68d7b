//! Metrics service client.
//!
//! Outbound interface to the remote metrics collaborator. The
//! `MetricsApi` trait is the seam the orchestrator depends on; the
//! reqwest-backed `MetricsClient` is the production implementation.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::models::{DoraMetricsResult, HealthStatus, ScanRequest};

/// Errors from talking to the metrics service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Human-readable message for the scan failure banner.
    ///
    /// Prefers the error payload the service returned; falls back to a
    /// generic message when the failure carries none.
    pub fn scan_message(&self) -> String {
        match self {
            ClientError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ClientError::Status { .. } => "Failed to scan repository".to_string(),
            ClientError::Http(e) => e.to_string(),
            ClientError::InvalidBaseUrl(_) => self.to_string(),
        }
    }
}

/// Outbound calls the scan orchestrator depends on.
#[async_trait]
pub trait MetricsApi: Send + Sync {
    /// Request a metrics scan for one repository and time window.
    async fn scan(&self, request: &ScanRequest) -> Result<DoraMetricsResult, ClientError>;

    /// Probe the service's health endpoint.
    async fn health(&self) -> Result<HealthStatus, ClientError>;
}

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the metrics service
    pub base_url: Url,

    /// Request timeout (scans can take a while on large repositories)
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("http://localhost:8080").expect("valid default URL"),
            timeout: Duration::from_secs(120),
        }
    }
}

/// HTTP client for the metrics service.
pub struct MetricsClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl MetricsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client with default configuration.
    pub fn with_defaults() -> Result<Self, ClientError> {
        Self::new(ClientConfig::default())
    }

    /// Build a client from loaded application configuration.
    pub fn from_config(config: &crate::config::ApiConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))?;

        Self::new(ClientConfig {
            base_url,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.config
            .base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl(e.to_string()))
    }
}

#[async_trait]
impl MetricsApi for MetricsClient {
    async fn scan(&self, request: &ScanRequest) -> Result<DoraMetricsResult, ClientError> {
        let url = self.endpoint("/api/metrics/scan")?;
        debug!("POST {}", url);

        let response = self.client.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.endpoint("/api/health")?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Health probe returned {}", status);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: String::new(),
            });
        }

        Ok(response.json().await?)
    }
}

/// Mock API for testing.
#[cfg(test)]
pub struct MockApi {
    result: DoraMetricsResult,
}

#[cfg(test)]
impl MockApi {
    pub fn new(result: DoraMetricsResult) -> Self {
        Self { result }
    }
}

#[cfg(test)]
#[async_trait]
impl MetricsApi for MockApi {
    async fn scan(&self, _request: &ScanRequest) -> Result<DoraMetricsResult, ClientError> {
        Ok(self.result.clone())
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        Ok(HealthStatus {
            status: "UP".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::models::TimeWindow;

    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_endpoint_joining() {
        let client = MetricsClient::with_defaults().unwrap();

        let scan = client.endpoint("/api/metrics/scan").unwrap();
        assert_eq!(scan.as_str(), "http://localhost:8080/api/metrics/scan");

        let health = client.endpoint("/api/health").unwrap();
        assert_eq!(health.as_str(), "http://localhost:8080/api/health");
    }

    #[test]
    fn test_endpoint_with_custom_base() {
        let config = ClientConfig {
            base_url: Url::parse("http://metrics.internal:9000").unwrap(),
            ..Default::default()
        };
        let client = MetricsClient::new(config).unwrap();

        let url = client.endpoint("/api/metrics/scan").unwrap();
        assert_eq!(url.as_str(), "http://metrics.internal:9000/api/metrics/scan");
    }

    #[test]
    fn test_scan_message_uses_payload() {
        let err = ClientError::Status {
            status: 400,
            message: "Invalid GitHub repo URL format".to_string(),
        };

        assert_eq!(err.scan_message(), "Invalid GitHub repo URL format");
    }

    #[test]
    fn test_scan_message_generic_fallback() {
        let err = ClientError::Status {
            status: 502,
            message: "   ".to_string(),
        };

        assert_eq!(err.scan_message(), "Failed to scan repository");
    }

    #[tokio::test]
    async fn test_mock_api() {
        let api = MockApi::new(DoraMetricsResult::default());
        let request = ScanRequest::new("https://github.com/helm/helm", TimeWindow::default());

        let result = api.scan(&request).await.unwrap();
        assert_eq!(result, DoraMetricsResult::default());

        let health = api.health().await.unwrap();
        assert_eq!(health.status, "UP");
    }
}
