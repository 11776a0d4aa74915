//! Public configuration for the repository client.
//!
//! This module provides a stable public API for configuring the client.
//! The internal config is derived from this.

use std::time::Duration;

/// Default Hub endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Default revision used for listing and downloading.
pub const DEFAULT_REVISION: &str = "main";

/// Default overall request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for the repository client.
///
/// Use the builder pattern methods to customize the client configuration.
///
/// # Example
///
/// ```
/// use hfdl_hf::HfClientConfig;
/// use std::time::Duration;
///
/// let config = HfClientConfig::new()
///     .with_timeout(Duration::from_secs(60))
///     .with_token("hf_xxx");
/// ```
#[derive(Debug, Clone)]
pub struct HfClientConfig {
    /// Scheme and host of the Hub (no trailing path)
    pub(crate) endpoint: String,
    /// Branch, tag or commit to list and download from
    pub(crate) revision: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Optional bearer token for private or gated repositories
    pub(crate) token: Option<String>,
    /// Expand directory entries by listing them as well
    pub(crate) recursive: bool,
}

impl Default for HfClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            revision: DEFAULT_REVISION.to_string(),
            user_agent: concat!("hfdl/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: DEFAULT_TIMEOUT,
            token: None,
            recursive: false,
        }
    }
}

impl HfClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Hub endpoint.
    ///
    /// Defaults to `https://huggingface.co`.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the revision to list and download from.
    #[must_use]
    pub fn with_revision(mut self, revision: impl Into<String>) -> Self {
        self.revision = revision.into();
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 120 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set an authentication token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional authentication token.
    ///
    /// An empty string is treated the same as no token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Expand directories found in a listing.
    #[must_use]
    pub const fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HfClientConfig::new();
        assert_eq!(config.endpoint, "https://huggingface.co");
        assert_eq!(config.revision, "main");
        assert!(config.user_agent.starts_with("hfdl/"));
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert!(config.token.is_none());
        assert!(!config.recursive);
    }

    #[test]
    fn test_builder_pattern() {
        let config = HfClientConfig::new()
            .with_endpoint("https://mirror.example")
            .with_revision("v1.0")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5))
            .with_token("secret")
            .with_recursive(true);

        assert_eq!(config.endpoint, "https://mirror.example");
        assert_eq!(config.revision, "v1.0");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token, Some("secret".to_string()));
        assert!(config.recursive);
    }

    #[test]
    fn test_optional_token() {
        let with_token = HfClientConfig::new().with_optional_token(Some("token".to_string()));
        assert_eq!(with_token.token, Some("token".to_string()));

        let without_token = HfClientConfig::new().with_optional_token(None);
        assert!(without_token.token.is_none());

        let empty = HfClientConfig::new().with_optional_token(Some(String::new()));
        assert!(empty.token.is_none());
    }
}
