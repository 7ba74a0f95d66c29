//! HTTP response handling and body decoding

use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Error, Result};

/// A fully buffered HTTP response.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Response {
    pub(crate) fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the status is in the 200–299 success range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    fn into_text(self) -> Result<(StatusCode, String)> {
        let status = self.status;
        let text = String::from_utf8(self.body.to_vec())?;
        Ok((status, text))
    }

    /// Decode the body as JSON.
    ///
    /// An empty or whitespace-only body decodes to `None` for any status.
    /// A non-success status yields a classified [`ApiError`] with the
    /// (best-effort parsed) body attached as the fault payload. A body that
    /// fails to parse is itself an error, never passed through.
    pub fn json_value(self) -> Result<Option<Value>> {
        let (status, text) = self.into_text()?;

        if text.trim().is_empty() {
            return if status.is_success() {
                Ok(None)
            } else {
                Err(ApiError::from_response(status, None).into())
            };
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => {
                if status.is_success() {
                    Ok(Some(value))
                } else {
                    Err(ApiError::from_response(status, Some(value)).into())
                }
            }
            Err(cause) => Err(ApiError::unparsable(status, text, &cause).into()),
        }
    }

    /// Treat the body as opaque text.
    ///
    /// An empty or whitespace-only body decodes to `None`. On a non-success
    /// status the body is still parsed as JSON best-effort so a structured
    /// fault is not lost, falling back to the raw text as the fault payload.
    pub fn text_value(self) -> Result<Option<String>> {
        let (status, text) = self.into_text()?;

        if !status.is_success() {
            return Err(classify_failure(status, &text));
        }

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }

    /// Decode the body as JSON and deserialize it into `T`.
    ///
    /// Used for the handful of fixed response shapes (`{"token": ...}`,
    /// `{"id": ...}`).
    pub fn parse<T: DeserializeOwned>(self) -> Result<T> {
        let value = self.json_value()?.unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(Error::Serialization)
    }

    /// Consume a failed response into its classified error.
    ///
    /// Must only be called when the status is outside the success range.
    pub(crate) fn into_error(self) -> Error {
        match self.into_text() {
            Ok((status, text)) => classify_failure(status, &text),
            Err(err) => err,
        }
    }
}

/// Classify a completed exchange with a non-success status, given its raw
/// body text.
pub(crate) fn classify_failure(status: StatusCode, text: &str) -> Error {
    let body = if text.trim().is_empty() {
        None
    } else {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Some(value),
            // Contract violation: keep the whole body inspectable.
            Err(_) => Some(Value::String(text.to_string())),
        }
    };
    ApiError::from_response(status, body).into()
}
