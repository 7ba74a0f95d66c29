//! Streamed response bodies
//!
//! The SeedData channel can carry payloads too large to buffer; these are
//! piped straight into a caller-supplied sink instead.

use futures::StreamExt;
use http::StatusCode;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::response::classify_failure;
use crate::error::Result;

/// An HTTP response whose body has not been buffered.
#[derive(Debug)]
pub struct StreamingResponse {
    inner: reqwest::Response,
}

impl StreamingResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Pipe the response body into `sink`.
    ///
    /// On a non-success status the body is buffered instead and classified
    /// into an API error; nothing is written to the sink in that case.
    pub async fn pipe_to<W>(self, sink: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let status = self.inner.status();
        if !status.is_success() {
            return Err(self.failure().await);
        }

        let mut stream = self.inner.bytes_stream();
        let mut written = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len();
            sink.write_all(&chunk).await?;
        }
        sink.flush().await?;
        debug!(written, "piped response body to sink");

        Ok(())
    }

    /// Consume the response body without delivering it anywhere, keeping the
    /// connection draining until the server is done.
    pub async fn drain(self) -> Result<()> {
        let status = self.inner.status();
        if !status.is_success() {
            return Err(self.failure().await);
        }

        let mut stream = self.inner.bytes_stream();
        while let Some(chunk) = stream.next().await {
            chunk?;
        }

        Ok(())
    }

    async fn failure(self) -> crate::Error {
        let status = self.inner.status();
        match self.inner.text().await {
            Ok(text) => classify_failure(status, &text),
            Err(err) => err.into(),
        }
    }
}
