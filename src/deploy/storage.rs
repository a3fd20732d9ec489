//! Remote object storage.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::config::{DeployConfig, UpyunCredentials};

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// What the storage service said about a single put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutOutcome {
    Stored,
    /// The service answered but did not store the file.
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("invalid storage endpoint {endpoint:?}: {reason}")]
    Endpoint { endpoint: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// A bucket that accepts whole files at a path.
#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn put_file(
        &self,
        remote_path: &str,
        bytes: Vec<u8>,
    ) -> Result<PutOutcome, StorageError>;
}

/// UpYun REST API client.
pub struct UpyunClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: UpyunCredentials,
}

impl UpyunClient {
    pub fn new(config: &DeployConfig) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("etiquette-quiz-deploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StorageError::Client)?;

        let endpoint = Url::parse(&config.endpoint).map_err(|e| StorageError::Endpoint {
            endpoint: config.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(StorageError::Endpoint {
                endpoint: config.endpoint.clone(),
                reason: "not a base URL".to_string(),
            });
        }

        Ok(Self {
            http,
            endpoint,
            credentials: config.credentials.clone(),
        })
    }

    /// Full URL of an object in the configured service.
    ///
    /// Every `/`-separated piece of `remote_path` becomes one percent-encoded
    /// path segment, so characters such as `\`, `?`, `#` and `%` stay inside
    /// the file name.
    pub fn object_url(&self, remote_path: &str) -> Result<Url, StorageError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StorageError::Endpoint {
                endpoint: self.endpoint.to_string(),
                reason: "not a base URL".to_string(),
            })?
            .pop_if_empty()
            .push(&self.credentials.service)
            .extend(remote_path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }
}

#[async_trait]
impl StorageClient for UpyunClient {
    async fn put_file(
        &self,
        remote_path: &str,
        bytes: Vec<u8>,
    ) -> Result<PutOutcome, StorageError> {
        let url = self.object_url(remote_path)?;
        debug!("PUT {} ({} bytes)", url, bytes.len());

        let response = self
            .http
            .put(url.clone())
            .basic_auth(&self.credentials.operator, Some(&self.credentials.password))
            .header("Mkdir", "true")
            .body(bytes)
            .send()
            .await
            .map_err(|source| StorageError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(PutOutcome::Stored);
        }

        let body = response.text().await.unwrap_or_default();
        Ok(PutOutcome::Rejected(format!("{}: {}", status, body.trim())))
    }
}
