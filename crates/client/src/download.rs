//! Fire-and-forget label downloads.
//!
//! Triggering a download is a one-way command: nothing is returned and a
//! failed export is only logged.

use std::path::{Path, PathBuf};

use anyhow::Context;

use stockbatch_batches::ExportRequest;
use stockbatch_core::BatchId;

use crate::config::{ClientConfig, ConfigError};

/// Starts a download of an export; never reports back.
pub trait DownloadTrigger: Send + Sync {
    fn trigger(&self, request: ExportRequest);
}

/// Build the export request for `batch_id` and hand it to `trigger`.
pub fn export_batch<T>(trigger: &T, batch_id: BatchId, items_per_row: u32)
where
    T: DownloadTrigger + ?Sized,
{
    trigger.trigger(ExportRequest::new(batch_id, items_per_row));
}

/// On-disk name for an export: the suggested filename with path separators replaced.
pub fn local_filename(request: &ExportRequest) -> String {
    request.suggested_filename().replace(['/', '\\'], "_")
}

/// Downloads exports over HTTP into a directory.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: reqwest::Client,
    api_url: String,
    download_dir: PathBuf,
}

impl HttpDownloader {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, download_dir: PathBuf) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            download_dir,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.http_client()?,
            config.api_url.clone(),
            config.download_dir.clone(),
        ))
    }

    /// Target path for `request` inside the download directory.
    pub fn target_path(&self, request: &ExportRequest) -> PathBuf {
        self.download_dir.join(local_filename(request))
    }
}

impl DownloadTrigger for HttpDownloader {
    fn trigger(&self, request: ExportRequest) {
        let url = request.url(&self.api_url);
        let path = self.target_path(&request);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(%url, "no async runtime; download not started");
            return;
        };

        tracing::info!(%url, path = %path.display(), "starting label download");
        let client = self.client.clone();
        runtime.spawn(async move {
            if let Err(err) = fetch_to_file(&client, &url, &path).await {
                tracing::warn!(%url, error = ?err, "label download failed");
            }
        });
    }
}

async fn fetch_to_file(client: &reqwest::Client, url: &str, path: &Path) -> anyhow::Result<()> {
    let body = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to request {url}"))?
        .error_for_status()
        .context("export endpoint returned an error status")?
        .bytes()
        .await
        .context("failed to read export body")?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create download directory at {:?}", parent))?;
    }

    tokio::fs::write(path, &body)
        .await
        .with_context(|| format!("failed to write export to {:?}", path))?;

    tracing::info!(path = %path.display(), bytes = body.len(), "label download complete");
    Ok(())
}
