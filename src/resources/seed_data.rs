//! SeedData: the raw-text blob channel
//!
//! SeedData payloads are caller-defined text (typically CSV) and travel
//! without a JSON envelope, so every call here opts into text decoding
//! explicitly. Large payloads can be streamed in either direction instead
//! of buffered.

use http::Method;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::{Repository, error::Result};

/// SeedData API resource.
#[derive(Clone)]
pub struct SeedData {
    client: Repository,
}

impl SeedData {
    pub(crate) fn new(client: Repository) -> Self {
        Self { client }
    }

    fn seed_data_path(id: u64) -> String {
        format!("/SeedData/{id}")
    }

    /// Read the SeedData blob with the given repository id, buffered.
    ///
    /// Returns `None` when the blob is empty.
    pub async fn read(&self, id: u64) -> Result<Option<String>> {
        debug!(id, "read seed data");

        self.client
            .request(Method::GET, &Self::seed_data_path(id))?
            .send()
            .await?
            .text_value()
    }

    /// Read the SeedData blob, piping it into `sink` instead of buffering.
    pub async fn read_stream<W>(&self, id: u64, sink: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        debug!(id, "read seed data stream");

        self.client
            .request(Method::GET, &Self::seed_data_path(id))?
            .send_streaming()
            .await?
            .pipe_to(sink)
            .await
    }

    /// Append pre-formatted text content to the SeedData blob.
    pub async fn append(&self, id: u64, content: impl Into<String>) -> Result<()> {
        debug!(id, "append seed data");

        self.client
            .request(Method::POST, &Self::seed_data_path(id))?
            .text(content)
            .send()
            .await?
            .text_value()?;

        Ok(())
    }

    /// Append content to the SeedData blob, streaming it from `source`.
    pub async fn append_stream<R>(&self, id: u64, source: R) -> Result<()>
    where
        R: AsyncRead + Send + Sync + 'static,
    {
        debug!(id, "append seed data stream");

        let body = reqwest::Body::wrap_stream(ReaderStream::new(Box::pin(source)));

        self.client
            .request(Method::POST, &Self::seed_data_path(id))?
            .stream(body)
            .send_streaming()
            .await?
            .drain()
            .await
    }

    /// Truncate the SeedData blob, discarding its content.
    pub async fn truncate(&self, id: u64) -> Result<()> {
        debug!(id, "truncate seed data");

        self.client
            .request(Method::DELETE, &Self::seed_data_path(id))?
            .send()
            .await?
            .text_value()?;

        Ok(())
    }
}
