//! Repository client for listing and fetching files.
//!
//! This module provides the main client interface for interacting with
//! the Hub API.

mod repo_files;

use crate::config::HfClientConfig;
use crate::error::HfResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::HfConfig;
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// Default client using the reqwest HTTP backend.
pub type DefaultHfClient = HfClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for interacting with the Hub API.
///
/// This client is generic over an HTTP backend, allowing for easy testing.
/// Use `DefaultHfClient` for production code.
pub struct HfClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) config: HfConfig,
}

impl DefaultHfClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails when the endpoint is not a valid URL or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &HfClientConfig) -> HfResult<Self> {
        let internal_config = Self::to_internal_config(config)?;
        let backend = ReqwestBackend::new(&internal_config)?;
        Ok(Self {
            backend,
            config: internal_config,
        })
    }

    fn to_internal_config(config: &HfClientConfig) -> HfResult<HfConfig> {
        Ok(HfConfig {
            endpoint: Url::parse(&config.endpoint)?,
            revision: config.revision.clone(),
            token: config.token.clone(),
            timeout: config.timeout,
            user_agent: config.user_agent.clone(),
            recursive: config.recursive,
        })
    }
}

impl<B: HttpBackend> HfClient<B> {
    /// Create a new client with a custom backend.
    ///
    /// Use this for testing with a fake backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(config: HfConfig, backend: B) -> Self {
        Self { backend, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HfError;

    pub fn test_config() -> HfConfig {
        HfConfig::default()
    }

    #[test]
    fn test_default_client_creation() {
        let config = HfClientConfig::new().with_token("secret");
        let client = DefaultHfClient::new(&config).unwrap();
        assert_eq!(client.config.token.as_deref(), Some("secret"));
        assert_eq!(client.config.endpoint.as_str(), "https://huggingface.co/");
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = HfClientConfig::new().with_endpoint("not a url");
        assert!(matches!(
            DefaultHfClient::new(&config),
            Err(HfError::InvalidUrl(_))
        ));
    }
}
