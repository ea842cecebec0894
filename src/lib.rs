pub mod cli;
pub mod config;
pub mod downloader;
pub mod error;
pub mod fetch;
pub mod file_manager;
pub mod html_parser;
pub mod logging;
pub mod mirror;
pub mod resolver;
pub mod rewriter;
pub mod sanitize;
pub mod site;

// Re-export main types for convenience
pub use config::MirrorConfig;
pub use downloader::{AssetDownloader, DownloadOutcome};
pub use error::{AssetError, FetchError};
pub use fetch::{Fetch, HttpFetcher};
pub use file_manager::FileManager;
pub use html_parser::{AssetCategory, AssetInventory, AssetSet, HtmlParser};
pub use mirror::{MirrorState, MirrorSummary, WebsiteMirror};
pub use resolver::resolve;
pub use rewriter::rewrite;
pub use sanitize::{local_path_for, sanitize_filename};
pub use site::SiteTarget;
