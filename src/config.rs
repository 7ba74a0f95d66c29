//! Configuration for the Repository client

use std::time::Duration;

use http::HeaderMap;

/// Default per-request timeout.
///
/// The wire protocol itself has no timeout notion; this exists so a hung
/// socket fails the call instead of hanging it forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the Repository client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Repository service, e.g.
    /// `http://localhost:8080/concerto/services/rest/RepositoryService/v1`.
    pub base_url: Option<String>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Optional caller attribution tag, sent as the `x-source` header on
    /// every request. Opaque to the client.
    pub source: Option<String>,

    /// Custom headers to include with every request.
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            source: None,
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration pointing at the given service URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Looks for:
    /// - `REPOSITORY_URL` for the service base URL
    /// - `REPOSITORY_TIMEOUT` for the request timeout (in seconds)
    /// - `REPOSITORY_SOURCE` for the `x-source` attribution tag
    pub fn from_env() -> Self {
        use std::env;

        let mut config = Self::default();

        if let Ok(base_url) = env::var("REPOSITORY_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(timeout_str) = env::var("REPOSITORY_TIMEOUT")
            && let Ok(timeout_secs) = timeout_str.parse::<u64>()
        {
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(source) = env::var("REPOSITORY_SOURCE") {
            config.source = Some(source);
        }

        config
    }
}

/// Builder for creating a [`ClientConfig`] with a fluent API.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the `x-source` attribution tag.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.config.source = Some(source.into());
        self
    }

    /// Add a default header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is not valid HTTP.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key: http::HeaderName = key_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderName(key_str.clone()))?;
        let value: http::HeaderValue = value_str
            .parse()
            .map_err(|_| crate::Error::InvalidHeaderValue(value_str.clone()))?;

        self.config.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.base_url.is_none());
        assert!(config.source.is_none());
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn builder_sets_all_fields() {
        let config = ClientConfigBuilder::new()
            .base_url("https://repo.example.com/services/rest/RepositoryService/v1")
            .timeout(Duration::from_secs(30))
            .source("nightly-sync")
            .default_header("x-trace", "1")
            .unwrap()
            .build();

        assert_eq!(
            config.base_url.as_deref(),
            Some("https://repo.example.com/services/rest/RepositoryService/v1")
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.source.as_deref(), Some("nightly-sync"));
        assert_eq!(config.default_headers.get("x-trace").unwrap(), "1");
    }

    #[test]
    fn invalid_default_header_is_rejected() {
        let result = ClientConfigBuilder::new().default_header("bad header", "v");
        assert!(result.is_err());
    }

    #[test]
    fn from_env_reads_all_variables() {
        temp_env::with_vars(
            [
                ("REPOSITORY_URL", Some("http://repo.example.com/svc")),
                ("REPOSITORY_TIMEOUT", Some("120")),
                ("REPOSITORY_SOURCE", Some("nightly-sync")),
            ],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(
                    config.base_url.as_deref(),
                    Some("http://repo.example.com/svc")
                );
                assert_eq!(config.timeout, Duration::from_secs(120));
                assert_eq!(config.source.as_deref(), Some("nightly-sync"));
            },
        );
    }

    #[test]
    fn from_env_with_nothing_set_is_the_default() {
        temp_env::with_vars_unset(
            ["REPOSITORY_URL", "REPOSITORY_TIMEOUT", "REPOSITORY_SOURCE"],
            || {
                let config = ClientConfig::from_env();
                assert!(config.base_url.is_none());
                assert_eq!(config.timeout, DEFAULT_TIMEOUT);
                assert!(config.source.is_none());
            },
        );
    }

    #[test]
    fn malformed_env_timeout_keeps_the_default() {
        temp_env::with_vars(
            [
                ("REPOSITORY_TIMEOUT", Some("soon")),
                ("REPOSITORY_URL", None),
                ("REPOSITORY_SOURCE", None),
            ],
            || {
                let config = ClientConfig::from_env();
                assert_eq!(config.timeout, DEFAULT_TIMEOUT);
            },
        );
    }
}
