//! HTTP backend abstraction for the Hub API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest.

use crate::error::{HfError, HfResult};
use crate::models::{HfConfig, RemoteFile};
use async_trait::async_trait;
use futures_util::{StreamExt, stream};
use serde::de::DeserializeOwned;
use std::io;
use std::time::Duration;
use tokio_util::io::StreamReader;
use url::Url;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can fetch JSON and raw bodies from URLs.
///
/// This is an implementation detail - external code should use the
/// `RepoClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HfResult<T>;

    /// Open a streaming GET on a URL.
    async fn get_stream(&self, url: &Url) -> HfResult<RemoteFile>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    timeout: Duration,
    auth_token: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HfConfig) -> HfResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
            auth_token: config.token.clone(),
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url.as_str());
        if let Some(ref token) = self.auth_token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"));
        }
        request
    }
}

/// Turn a non-2xx response into an API error carrying the body text.
async fn check_status(response: reqwest::Response, url: &Url) -> HfResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(HfError::Api {
        status: status.as_u16(),
        body: body.trim().to_string(),
        url: url.to_string(),
    })
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> HfResult<T> {
        tracing::debug!(%url, "GET json");
        let response = self.build_request(url).timeout(self.timeout).send().await?;
        let response = check_status(response, url).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_stream(&self, url: &Url) -> HfResult<RemoteFile> {
        tracing::debug!(%url, "GET stream");
        // The deadline applies to the response head and to each body chunk separately.
        let idle = self.timeout;
        let response = tokio::time::timeout(idle, self.build_request(url).send())
            .await
            .map_err(|_| HfError::Timeout {
                url: url.to_string(),
                after: idle,
            })??;
        let response = check_status(response, url).await?;

        let content_length = response.content_length();
        let url = url.to_string();
        let chunks = Some(Box::pin(response.bytes_stream()));
        let body = stream::unfold(chunks, move |state| {
            let url = url.clone();
            async move {
                let Some(mut chunks) = state else {
                    return None;
                };
                match tokio::time::timeout(idle, chunks.next()).await {
                    Ok(Some(Ok(bytes))) => Some((Ok(bytes), Some(chunks))),
                    Ok(Some(Err(e))) => Some((Err(io::Error::other(e)), None)),
                    Ok(None) => None,
                    Err(_) => {
                        tracing::debug!(%url, "body stalled");
                        let stalled = HfError::Timeout { url, after: idle };
                        Some((Err(io::Error::new(io::ErrorKind::TimedOut, stalled)), None))
                    }
                }
            }
        });
        Ok(RemoteFile::new(StreamReader::new(Box::pin(body)), content_length))
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
