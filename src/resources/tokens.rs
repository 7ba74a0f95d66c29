//! Authentication token exchange
//!
//! `Tokens` performs the raw handshakes; it neither stores tokens nor
//! attaches them to other calls. That is the session's job, on
//! [`Repository`](crate::Repository).

use http::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Repository, error::Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    user_name: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApiTokenExchange<'a> {
    api_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<&'a str>,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

/// Tokens API resource.
#[derive(Clone)]
pub struct Tokens {
    client: Repository,
}

impl Tokens {
    pub(crate) fn new(client: Repository) -> Self {
        Self { client }
    }

    /// Exchange user credentials for an auth token.
    ///
    /// `PUT <base>/Tokens` with `{"userName", "password", "tenant"?}`.
    pub async fn connect(
        &self,
        tenant: Option<&str>,
        user_name: &str,
        password: &str,
    ) -> Result<String> {
        debug!(?tenant, user_name, "connect");

        let credentials = Credentials {
            user_name,
            password,
            tenant,
        };

        let resp: TokenResponse = self
            .client
            .request_anonymous(Method::PUT, "/Tokens")?
            .json(&credentials)?
            .send()
            .await?
            .parse()?;

        Ok(resp.token)
    }

    /// Exchange an externally obtained API token for an auth token.
    ///
    /// `PUT <base>/Tokens` with `{"apiToken", "tenant"?}`.
    pub async fn connect_by_api_token(
        &self,
        tenant: Option<&str>,
        api_token: &str,
    ) -> Result<String> {
        debug!(?tenant, "connect by api token");

        let exchange = ApiTokenExchange { api_token, tenant };

        let resp: TokenResponse = self
            .client
            .request_anonymous(Method::PUT, "/Tokens")?
            .json(&exchange)?
            .send()
            .await?
            .parse()?;

        Ok(resp.token)
    }

    /// Invalidate `token` server-side.
    ///
    /// `DELETE <base>/Tokens/<token>`. The token travels in the URL, not in
    /// the auth header.
    pub async fn disconnect(&self, token: &str) -> Result<()> {
        debug!("disconnect");

        self.client
            .request_anonymous(Method::DELETE, &format!("/Tokens/{token}"))?
            .send()
            .await?
            .json_value()?;

        Ok(())
    }
}
