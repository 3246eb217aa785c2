//! Streaming artifact download

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::client::PaperClient;
use crate::error::{Error, Result};

impl PaperClient {
    /// Stream `url` into `destination`, creating or truncating it.
    ///
    /// Returns the number of bytes written. On failure the destination
    /// contents are unspecified and must not be used.
    pub async fn fetch(&self, url: &str, destination: &Path) -> Result<u64> {
        let failed = |reason: String| Error::DownloadFailed {
            url: url.to_string(),
            reason,
        };

        let mut resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(failed(format!("server returned {status}")));
        }

        let total = resp.content_length();
        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| failed(format!("cannot create {}: {e}", destination.display())))?;

        let mut chunks: u64 = 0;
        let mut bytes: u64 = 0;
        while let Some(chunk) = resp.chunk().await.map_err(|e| failed(e.to_string()))? {
            file.write_all(&chunk)
                .await
                .map_err(|e| failed(format!("write to {}: {e}", destination.display())))?;
            chunks += 1;
            bytes += chunk.len() as u64;
            tracing::trace!(url, chunks, bytes, ?total, "Received chunk");
        }

        file.flush()
            .await
            .map_err(|e| failed(format!("flush {}: {e}", destination.display())))?;

        tracing::info!(url, bytes, chunks, "Download complete");
        Ok(bytes)
    }
}
