//! HTTP client construction and request minting

use std::time::Duration;

use http::{HeaderMap, Method};
use url::Url;

use crate::{config::ClientConfig, error::Result, http::RequestBuilder};

/// Owns the underlying HTTP client and the service base URL, and mints one
/// [`RequestBuilder`] per call.
///
/// The client is pinned to HTTP/1.1 with connection pooling disabled: every
/// exchange sends `Connection: close` and opens its own connection. That is
/// the protocol the service expects from short-lived scripted callers, and
/// the header is only meaningful on HTTP/1.1.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    default_headers: HeaderMap,
}

impl Transport {
    /// Build a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no base URL is configured, the base URL does not
    /// parse, or the HTTP client cannot be constructed.
    pub(crate) fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| crate::Error::MissingConfig("base_url".to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();

        // Validate eagerly so a bad URL fails at construction, not per call.
        Url::parse(&base_url)?;

        let http = reqwest::Client::builder()
            .http1_only()
            .pool_max_idle_per_host(0)
            .build()?;

        let mut default_headers = config.default_headers.clone();
        if let Some(source) = &config.source {
            let value = source
                .parse()
                .map_err(|_| crate::Error::InvalidHeaderValue(source.clone()))?;
            default_headers.insert("x-source", value);
        }

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
            default_headers,
        })
    }

    /// Create a request builder for `path`, which must start with `/` and is
    /// appended to the base URL verbatim (the base URL may itself carry a
    /// path, so [`Url::join`] semantics would be wrong here).
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = Url::parse(&format!("{}{}", self.base_url, path))?;

        let mut builder = RequestBuilder::new(self.http.clone(), method, url)
            .timeout(self.timeout);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        Ok(builder)
    }

    /// The configured base URL, without a trailing slash.
    #[cfg(test)]
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> ClientConfig {
        ClientConfig::with_base_url(base_url)
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let transport = Transport::new(&config("http://localhost:8080/svc/")).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080/svc");
    }

    #[test]
    fn path_is_appended_to_the_base_path() {
        let transport =
            Transport::new(&config("http://localhost:8080/concerto/services/rest/v1")).unwrap();
        let req = transport.request(Method::GET, "/Objects/widget/1").unwrap();
        assert_eq!(
            req.url().as_str(),
            "http://localhost:8080/concerto/services/rest/v1/Objects/widget/1"
        );
    }

    #[test]
    fn missing_base_url_is_rejected() {
        let result = Transport::new(&ClientConfig::default());
        assert!(matches!(result, Err(crate::Error::MissingConfig(_))));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = Transport::new(&config("not a url"));
        assert!(matches!(result, Err(crate::Error::InvalidUrl(_))));
    }

    #[test]
    fn source_tag_becomes_a_default_header() {
        let mut cfg = config("http://localhost:8080/svc");
        cfg.source = Some("nightly-sync".to_string());
        let transport = Transport::new(&cfg).unwrap();
        let req = transport.request(Method::GET, "/Objects").unwrap();
        assert_eq!(req.headers().get("x-source").unwrap(), "nightly-sync");
    }
}
