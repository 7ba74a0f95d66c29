//! HTTP request builder

use std::time::Duration;

use http::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::{Response, StreamingResponse};
use crate::{error::Result, query::Query};

#[derive(Debug)]
enum RequestBody {
    Json(Vec<u8>),
    Text(String),
    Stream(reqwest::Body),
}

/// Builder for a single HTTP exchange against the Repository service.
///
/// Constructed by the transport; one builder performs exactly one request.
#[derive(Debug)]
pub struct RequestBuilder {
    client: reqwest::Client,
    method: Method,
    url: Url,
    headers: HeaderMap,
    token: Option<String>,
    body: Option<RequestBody>,
    timeout: Duration,
}

impl RequestBuilder {
    pub(crate) fn new(client: reqwest::Client, method: Method, url: Url) -> Self {
        Self {
            client,
            method,
            url,
            headers: HeaderMap::new(),
            token: None,
            body: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
        }
    }

    /// Attach the session token, sent as the `X-Auth-Token` header.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set a header.
    pub fn header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Serialize `body` to JSON and use it as the request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(RequestBody::Json(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Use a pre-formatted string (e.g. CSV) as the request body, unchanged.
    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Use a byte stream as the request body.
    pub fn stream(mut self, body: reqwest::Body) -> Self {
        self.body = Some(RequestBody::Stream(body));
        self
    }

    /// Append a query filter to the URL.
    pub fn query(mut self, query: &Query) -> Self {
        if let Some(qs) = query.to_query_string() {
            self.url.set_query(Some(&qs));
        }
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The headers set so far (token and content headers are applied at
    /// send time).
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn into_reqwest(self) -> (reqwest::RequestBuilder, Method, Url) {
        let mut headers = self.headers;
        headers.insert(CONNECTION, HeaderValue::from_static("close"));

        if let Some(token) = &self.token
            && let Ok(value) = HeaderValue::from_str(token)
        {
            headers.insert("X-Auth-Token", value);
        }

        // Buffered bodies get explicit content headers; streams do not,
        // their length is unknown up front.
        match &self.body {
            Some(RequestBody::Json(bytes)) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
            }
            Some(RequestBody::Text(text)) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                headers.insert(CONTENT_LENGTH, HeaderValue::from(text.len()));
            }
            Some(RequestBody::Stream(_)) | None => {}
        }

        let mut req = self
            .client
            .request(self.method.clone(), self.url.clone())
            .headers(headers)
            .timeout(self.timeout);

        req = match self.body {
            Some(RequestBody::Json(bytes)) => req.body(bytes),
            Some(RequestBody::Text(text)) => req.body(text),
            Some(RequestBody::Stream(body)) => req.body(body),
            None => req,
        };

        (req, self.method, self.url)
    }

    /// Send the request and buffer the entire response.
    ///
    /// Transport-level failures surface as the underlying [`reqwest::Error`];
    /// HTTP-level failures are classified when the response is decoded.
    pub async fn send(self) -> Result<Response> {
        let (req, method, url) = self.into_reqwest();
        debug!(%method, %url, "sending request");

        let resp = req.send().await?;
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await?;
        debug!(%status, body_len = body.len(), "got response");

        Ok(Response::new(status, headers, body))
    }

    /// Send the request and hand back the response body as a byte stream,
    /// without buffering it.
    pub async fn send_streaming(self) -> Result<StreamingResponse> {
        let (req, method, url) = self.into_reqwest();
        debug!(%method, %url, "sending streaming request");

        let resp = req.send().await?;
        debug!(status = %resp.status(), "got streaming response");

        Ok(StreamingResponse::new(resp))
    }
}
