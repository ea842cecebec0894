use std::path::PathBuf;
use std::sync::Arc;

use futures::future::join_all;
use indicatif::ProgressBar;
use tracing::{debug, warn};
use url::Url;

use crate::error::AssetError;
use crate::fetch::Fetch;
use crate::file_manager::FileManager;
use crate::html_parser::{AssetCategory, AssetInventory};
use crate::sanitize::local_path_for;

/// What happened to one resolved asset URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success {
        url: String,
        category: AssetCategory,
        /// Mirror-relative path, e.g. `images/photo.jpg`.
        local_path: String,
        bytes: usize,
    },
    Failure {
        url: String,
        category: AssetCategory,
        reason: String,
    },
}

impl DownloadOutcome {
    pub fn url(&self) -> &str {
        match self {
            DownloadOutcome::Success { url, .. } | DownloadOutcome::Failure { url, .. } => url,
        }
    }

    pub fn category(&self) -> AssetCategory {
        match self {
            DownloadOutcome::Success { category, .. } => *category,
            DownloadOutcome::Failure { category, .. } => *category,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Success { .. })
    }
}

/// Fetches assets and writes them into the mirror, one file per URL.
///
/// A failing asset never fails the batch: every error is logged and turned
/// into [`DownloadOutcome::Failure`].
#[derive(Clone)]
pub struct AssetDownloader {
    fetcher: Arc<dyn Fetch>,
    files: FileManager,
}

impl AssetDownloader {
    pub fn new(fetcher: Arc<dyn Fetch>, files: FileManager) -> Self {
        Self { fetcher, files }
    }

    pub async fn download(&self, url: &str, category: AssetCategory) -> DownloadOutcome {
        match self.try_download(url, category).await {
            Ok((local_path, written, bytes)) => {
                debug!(%url, path = %written.display(), bytes, "asset saved");
                DownloadOutcome::Success {
                    url: url.to_string(),
                    category,
                    local_path,
                    bytes,
                }
            }
            Err(e) => {
                warn!(%url, %category, reason = %e, "failed to download asset");
                DownloadOutcome::Failure {
                    url: url.to_string(),
                    category,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_download(
        &self,
        url: &str,
        category: AssetCategory,
    ) -> Result<(String, PathBuf, usize), AssetError> {
        Url::parse(url).map_err(|e| AssetError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let content = self.fetcher.fetch_bytes(url).await?;

        // Distinct URLs sharing a basename land on the same file; last write wins.
        let local_path = local_path_for(category, url);
        let written = self
            .files
            .write_file(&local_path, &content)
            .map_err(|source| AssetError::Write {
                path: self.files.resolve(&local_path),
                source,
            })?;

        Ok((local_path, written, content.len()))
    }

    /// Downloads every URL in `inventory` concurrently and waits for all of
    /// them to settle. Outcomes come back in inventory order.
    pub async fn download_all(
        &self,
        inventory: &AssetInventory,
        progress: &ProgressBar,
    ) -> Vec<DownloadOutcome> {
        let downloads = inventory.iter().map(|(category, url)| async move {
            let outcome = self.download(url, category).await;
            progress.inc(1);
            outcome
        });

        join_all(downloads).await
    }
}
