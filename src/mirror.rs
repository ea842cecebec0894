use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::config::MirrorConfig;
use crate::downloader::{AssetDownloader, DownloadOutcome};
use crate::fetch::{Fetch, HttpFetcher};
use crate::file_manager::FileManager;
use crate::html_parser::{AssetCategory, HtmlParser};
use crate::rewriter::rewrite;
use crate::site::SiteTarget;

/// Where a run is. Only `Initializing` and `FetchingPage` can end in `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorState {
    Initializing,
    FetchingPage,
    Collecting,
    Downloading,
    Rewriting,
    Done,
    Failed,
}

impl fmt::Display for MirrorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct MirrorSummary {
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
    pub outcomes: Vec<DownloadOutcome>,
}

impl MirrorSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DownloadOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// `(succeeded, failed)` for one category.
    pub fn count_for(&self, category: AssetCategory) -> (usize, usize) {
        self.outcomes
            .iter()
            .filter(|o| o.category() == category)
            .fold((0, 0), |(ok, err), o| {
                if o.is_success() {
                    (ok + 1, err)
                } else {
                    (ok, err + 1)
                }
            })
    }
}

/// Mirrors one page and the stylesheets, scripts and images it references.
pub struct WebsiteMirror {
    site: SiteTarget,
    config: MirrorConfig,
    fetcher: Arc<dyn Fetch>,
    file_manager: FileManager,
    html_parser: HtmlParser,
    state: MirrorState,
}

impl WebsiteMirror {
    pub fn new(url: &str, config: MirrorConfig) -> Result<Self> {
        let site = SiteTarget::parse(url)?;
        let fetcher = HttpFetcher::new(config.request_timeout)?;
        Ok(Self::with_fetcher(site, config, Arc::new(fetcher)))
    }

    pub fn with_fetcher(site: SiteTarget, config: MirrorConfig, fetcher: Arc<dyn Fetch>) -> Self {
        let output_dir = config.output_root.join(site.directory_name());
        Self {
            file_manager: FileManager::new(&output_dir),
            html_parser: HtmlParser::new(site.clone()),
            site,
            config,
            fetcher,
            state: MirrorState::Initializing,
        }
    }

    pub fn state(&self) -> MirrorState {
        self.state
    }

    pub fn site(&self) -> &SiteTarget {
        &self.site
    }

    pub fn output_dir(&self) -> &Path {
        self.file_manager.base_dir()
    }

    fn transition(&mut self, next: MirrorState) {
        debug!(from = %self.state, to = %next, "mirror state");
        self.state = next;
    }

    pub async fn mirror_website(&mut self) -> Result<MirrorSummary> {
        if self.config.show_progress {
            println!("🚀 Mirroring: {}", self.site.href().blue());
            println!("📁 Output directory: {:?}", self.output_dir());
        }

        if let Err(e) = self.file_manager.prepare() {
            self.transition(MirrorState::Failed);
            return Err(e);
        }

        self.transition(MirrorState::FetchingPage);
        let page = self.fetcher.fetch_text(self.site.href()).await;
        let html = match page {
            Ok(html) => html,
            Err(e) => {
                self.transition(MirrorState::Failed);
                return Err(e).with_context(|| format!("Failed to fetch page {}", self.site.href()));
            }
        };
        info!(url = %self.site.href(), bytes = html.len(), "page fetched");

        self.transition(MirrorState::Collecting);
        let inventory = self.html_parser.collect_all(&html);
        info!(
            stylesheets = inventory.stylesheets.len(),
            scripts = inventory.scripts.len(),
            images = inventory.images.len(),
            "assets discovered"
        );

        self.transition(MirrorState::Downloading);
        let progress = self.progress_bar(inventory.len() as u64)?;
        let downloader = AssetDownloader::new(self.fetcher.clone(), self.file_manager.clone());
        let outcomes = downloader.download_all(&inventory, &progress).await;
        progress.finish_and_clear();

        self.transition(MirrorState::Rewriting);
        let rewritten = rewrite(&html, &self.site)?;
        let index_path = self.file_manager.write_index(&rewritten)?;

        self.transition(MirrorState::Done);
        let summary = MirrorSummary {
            output_dir: self.output_dir().to_path_buf(),
            index_path,
            outcomes,
        };
        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            "mirror complete"
        );

        Ok(summary)
    }

    fn progress_bar(&self, len: u64) -> Result<ProgressBar> {
        if !self.config.show_progress {
            return Ok(ProgressBar::hidden());
        }
        let bar = ProgressBar::new(len);
        let style =
            ProgressStyle::default_bar().template("{spinner} [{bar:30}] {pos}/{len} assets")?;
        bar.set_style(style);
        Ok(bar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::MockFetch;
    use reqwest::StatusCode;
    use std::fs;
    use tempfile::tempdir;

    const PAGE: &str = r#"<!DOCTYPE html><html><head>
        <link rel="stylesheet" href="/style.css">
        <script src="//cdn.example.com/app.js"></script>
        </head><body><img src="photo.jpg"><img src="/photo.jpg"></body></html>"#;

    fn mirror(root: &Path, fetcher: MockFetch) -> WebsiteMirror {
        let site = SiteTarget::parse("https://example.com/").unwrap();
        let config = MirrorConfig::default().with_output_root(root).quiet();
        WebsiteMirror::with_fetcher(site, config, Arc::new(fetcher))
    }

    #[tokio::test]
    async fn full_run_reaches_done() {
        let temp_dir = tempdir().unwrap();
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch_text()
            .times(1)
            .returning(|_| Ok(PAGE.to_string()));
        fetcher
            .expect_fetch_bytes()
            .times(3)
            .returning(|url| Ok(url.as_bytes().to_vec()));

        let mut mirror = mirror(temp_dir.path(), fetcher);
        let summary = mirror.mirror_website().await.unwrap();

        assert_eq!(mirror.state(), MirrorState::Done);
        assert_eq!(summary.succeeded(), 3);
        assert_eq!(summary.failed(), 0);
        assert_eq!(summary.count_for(AssetCategory::Image), (1, 0));

        let root = temp_dir.path().join("example.com");
        assert_eq!(summary.output_dir, root);
        assert_eq!(summary.index_path, root.join("index.html"));
        assert!(root.join("css/style.css").is_file());
        assert!(root.join("js/app.js").is_file());
        assert!(root.join("images/photo.jpg").is_file());
    }

    #[tokio::test]
    async fn asset_failures_are_counted_not_fatal() {
        let temp_dir = tempdir().unwrap();
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch_text()
            .returning(|_| Ok(PAGE.to_string()));
        fetcher.expect_fetch_bytes().returning(|url| {
            if url.ends_with(".js") {
                Err(FetchError::Status {
                    url: url.to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                })
            } else {
                Ok(Vec::new())
            }
        });

        let mut mirror = mirror(temp_dir.path(), fetcher);
        let summary = mirror.mirror_website().await.unwrap();

        assert_eq!(mirror.state(), MirrorState::Done);
        assert_eq!(summary.succeeded(), 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(summary.count_for(AssetCategory::Script), (0, 1));
        let failure = summary.failures().next().unwrap();
        assert_eq!(failure.url(), "https://cdn.example.com/app.js");

        // The page still points at the asset that never arrived.
        let index = fs::read_to_string(&summary.index_path).unwrap();
        assert!(index.contains(r#"src="js/app.js""#));
    }

    #[tokio::test]
    async fn page_fetch_failure_is_fatal() {
        let temp_dir = tempdir().unwrap();
        let mut fetcher = MockFetch::new();
        fetcher
            .expect_fetch_text()
            .returning(|_| Err(FetchError::Request("dns error".into())));
        fetcher.expect_fetch_bytes().never();

        let mut mirror = mirror(temp_dir.path(), fetcher);
        let err = mirror.mirror_website().await.unwrap_err();

        assert_eq!(mirror.state(), MirrorState::Failed);
        assert!(format!("{:#}", err).contains("dns error"));
        let root = temp_dir.path().join("example.com");
        assert!(!root.join("index.html").exists());
        assert_eq!(fs::read_dir(root.join("images")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn directory_failure_is_fatal() {
        let temp_dir = tempdir().unwrap();
        // A plain file where the output root's parent should be.
        let blocker = temp_dir.path().join("blocked");
        fs::write(&blocker, b"").unwrap();

        let mut fetcher = MockFetch::new();
        fetcher.expect_fetch_text().never();

        let mut mirror = mirror(&blocker, fetcher);
        assert!(mirror.mirror_website().await.is_err());
        assert_eq!(mirror.state(), MirrorState::Failed);
    }

    #[test]
    fn starts_initializing_under_host_directory() {
        let temp_dir = tempdir().unwrap();
        let mirror = mirror(temp_dir.path(), MockFetch::new());
        assert_eq!(mirror.state(), MirrorState::Initializing);
        assert_eq!(mirror.output_dir(), temp_dir.path().join("example.com"));
        assert_eq!(mirror.site().hostname(), "example.com");
    }
}
