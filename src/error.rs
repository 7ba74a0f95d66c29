//! Error types for the Repository client
//!
//! Two failure families exist and are deliberately kept distinct: transport
//! failures (connection refused, DNS, TLS, timeout) are surfaced as the
//! underlying [`reqwest::Error`] without wrapping, while completed HTTP
//! exchanges with a non-2xx status (or an unparsable body) become a typed
//! [`ApiError`] carrying the status code and the server's fault payload.

use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Repository client.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange completed but the server reported a failure, or the
    /// response body could not be decoded as expected.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The connection could not be established or was interrupted; no HTTP
    /// semantics apply. Propagated unwrapped from the transport.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A request body could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The service URL (or a path joined onto it) is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// I/O failure while piping a streamed body to or from the caller.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The response body was not valid UTF-8.
    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A required piece of configuration is missing.
    #[error("missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid HTTP header name.
    #[error("invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// A completion handle was dropped without delivering a result.
    #[error("completion callback dropped before delivering a result")]
    CallbackDropped,
}

/// Typed error for API responses that are not successful.
///
/// Used for requests that succeed on the transport but fail at the
/// application layer. `message` is the server fault's message when one was
/// supplied, otherwise the HTTP status reason phrase; it is never empty for
/// a completed exchange.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status code returned by the server.
    pub status: u16,
    /// The status reason phrase.
    pub status_message: String,
    /// Fault payload. The server's `fault` object when the body matched the
    /// expected `{"fault": {...}}` envelope; otherwise the entire body,
    /// retained verbatim so contract violations stay inspectable.
    pub fault: Option<Value>,
    /// Human-readable message, suitable for display as-is.
    pub message: String,
}

impl ApiError {
    /// Classify a completed exchange with a non-success status.
    ///
    /// `body` is the decoded response body, if any. If it is an object with
    /// a `fault` key, that fault is inlined and its `message` (when
    /// non-empty) becomes the error's message; otherwise the whole body is
    /// stashed as the fault and the reason phrase is used.
    pub(crate) fn from_response(status: StatusCode, body: Option<Value>) -> Self {
        let status_message = reason_phrase(status);

        let fault = match body {
            Some(Value::Object(ref map)) if map.contains_key("fault") => {
                map.get("fault").cloned()
            }
            other => other,
        };

        let message = fault
            .as_ref()
            .and_then(|f| f.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| status_message.clone());

        Self {
            status: status.as_u16(),
            status_message,
            fault,
            message,
        }
    }

    /// Classify a response whose body was expected to be JSON but failed to
    /// parse. The raw text is retained as the fault payload so the caller
    /// never receives malformed JSON as if it were valid.
    pub(crate) fn unparsable(status: StatusCode, raw: String, cause: &serde_json::Error) -> Self {
        Self {
            status: status.as_u16(),
            status_message: reason_phrase(status),
            fault: Some(Value::String(raw)),
            message: cause.to_string(),
        }
    }

    /// The `code` field of the server fault, if one was supplied.
    pub fn fault_code(&self) -> Option<&str> {
        self.fault.as_ref()?.get("code")?.as_str()
    }

    /// The `message` field of the server fault, if one was supplied.
    pub fn fault_message(&self) -> Option<&str> {
        self.fault.as_ref()?.get("message")?.as_str()
    }
}

fn reason_phrase(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

impl Error {
    /// Return the HTTP status code, if this is an API-level error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status),
            _ => None,
        }
    }
}
