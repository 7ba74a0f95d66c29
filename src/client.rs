//! Main client implementation for the Repository service

use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use http::Method;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use crate::{
    config::{ClientConfig, ClientConfigBuilder},
    error::Result,
    http::{RequestBuilder, Transport},
    resources::{Annotations, Objects, SeedData, Timelines, Tokens},
};

/// Client for the Repository service.
///
/// The client is the session: it performs the authentication handshake,
/// holds the resulting token, and attaches it to every subsequent request.
/// Cloning is cheap and clones share the session.
///
/// # Example
///
/// ```rust,no_run
/// use repository_client::Repository;
///
/// # async fn example() -> repository_client::Result<()> {
/// let repo = Repository::new("http://localhost:8080/concerto/services/rest/RepositoryService/v1")?;
/// repo.connect(Some("tenant1"), "admin", "secret").await?;
/// let widget = repo.objects().get("widget", 42).await?;
/// repo.disconnect().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Repository {
    inner: Arc<RepositoryInner>,
}

struct RepositoryInner {
    transport: Transport,

    /// The session token. Written only by connect/disconnect/set_token,
    /// read by every call. Callers racing a disconnect against an in-flight
    /// call get whichever token is current when each request is built.
    token: RwLock<Option<SecretString>>,

    // Lazy-initialized resources
    tokens: OnceLock<Tokens>,
    objects: OnceLock<Objects>,
    seed_data: OnceLock<SeedData>,
    annotations: OnceLock<Annotations>,
    timelines: OnceLock<Timelines>,
}

impl Repository {
    /// Create a client for the service at `base_url`, with default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::with_base_url(base_url))
    }

    /// Create a client builder for advanced configuration.
    pub fn builder() -> RepositoryBuilder {
        RepositoryBuilder::default()
    }

    /// Create a client from a configuration object.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = Transport::new(&config)?;

        Ok(Self {
            inner: Arc::new(RepositoryInner {
                transport,
                token: RwLock::new(None),
                tokens: OnceLock::new(),
                objects: OnceLock::new(),
                seed_data: OnceLock::new(),
                annotations: OnceLock::new(),
                timelines: OnceLock::new(),
            }),
        })
    }

    /// Authenticate with user credentials and store the resulting token.
    ///
    /// A successful connect replaces any previously held token without
    /// invalidating it server-side.
    pub async fn connect(
        &self,
        tenant: Option<&str>,
        user_name: &str,
        password: &str,
    ) -> Result<()> {
        let token = self.tokens().connect(tenant, user_name, password).await?;
        self.store_token(token);
        Ok(())
    }

    /// Authenticate with an API token obtained through a side channel and
    /// store the resulting session token.
    pub async fn connect_by_api_token(
        &self,
        tenant: Option<&str>,
        api_token: &str,
    ) -> Result<()> {
        let token = self
            .tokens()
            .connect_by_api_token(tenant, api_token)
            .await?;
        self.store_token(token);
        Ok(())
    }

    /// Adopt an externally obtained session token (e.g. lifted from a
    /// cookie), skipping the handshake.
    pub fn set_token(&self, token: impl Into<String>) {
        self.store_token(token.into());
    }

    /// The currently held session token, if authenticated.
    pub fn token(&self) -> Option<String> {
        read_lock(&self.inner.token)
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }

    /// Invalidate the session token server-side and forget it locally.
    ///
    /// The local token is cleared before the invalidation request is
    /// issued, so the session is unauthenticated afterwards even if the
    /// remote call fails (its error is still returned). Disconnecting an
    /// unauthenticated session is a no-op success.
    pub async fn disconnect(&self) -> Result<()> {
        let token = write_lock(&self.inner.token).take();

        match token {
            Some(token) => {
                let result = self.tokens().disconnect(token.expose_secret()).await;
                if let Err(err) = &result {
                    error!(%err, "remote token invalidation failed; local token already cleared");
                }
                result
            }
            None => Ok(()),
        }
    }

    /// Access the Tokens endpoint directly.
    ///
    /// Most callers want [`connect`](Self::connect) /
    /// [`disconnect`](Self::disconnect) instead, which also maintain the
    /// session state.
    pub fn tokens(&self) -> &Tokens {
        self.inner.tokens.get_or_init(|| Tokens::new(self.clone()))
    }

    /// Access the Objects endpoint.
    pub fn objects(&self) -> &Objects {
        self.inner
            .objects
            .get_or_init(|| Objects::new(self.clone()))
    }

    /// Access the SeedData endpoint.
    pub fn seed_data(&self) -> &SeedData {
        self.inner
            .seed_data
            .get_or_init(|| SeedData::new(self.clone()))
    }

    /// Access the Annotations endpoint.
    pub fn annotations(&self) -> &Annotations {
        self.inner
            .annotations
            .get_or_init(|| Annotations::new(self.clone()))
    }

    /// Access the Timelines endpoint.
    pub fn timelines(&self) -> &Timelines {
        self.inner
            .timelines
            .get_or_init(|| Timelines::new(self.clone()))
    }

    /// Create a request builder carrying the current session token, if any.
    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let builder = self.inner.transport.request(method, path)?;
        Ok(match self.token() {
            Some(token) => builder.token(token),
            None => builder,
        })
    }

    /// Create a request builder without a token (the auth handshake and
    /// token invalidation endpoints are themselves unauthenticated).
    pub(crate) fn request_anonymous(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder> {
        self.inner.transport.request(method, path)
    }

    fn store_token(&self, token: String) {
        debug!("storing session token");
        *write_lock(&self.inner.token) = Some(SecretString::from(token));
    }
}

// Lock poisoning cannot leave the token in a torn state (it is a single
// Option write), so a poisoned lock is recovered rather than propagated.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

/// Builder for creating a [`Repository`] client with a fluent API.
#[derive(Debug, Default)]
pub struct RepositoryBuilder {
    config: ClientConfigBuilder,
}

impl RepositoryBuilder {
    /// Set the service base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.base_url(base_url);
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the `x-source` attribution tag sent with every request.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.config = self.config.source(source);
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
    ) -> Result<Self> {
        self.config = self.config.default_header(key, value)?;
        Ok(self)
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or invalid, or the HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<Repository> {
        Repository::from_config(self.config.build())
    }
}
