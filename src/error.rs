//! Typed errors for the transport and per-asset seams.
//!
//! Both stay local: an [`AssetError`] never escapes the downloader, it is
//! folded into a `DownloadOutcome::Failure`. Fatal run errors go through
//! `anyhow` instead.

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure to retrieve a URL through a [`crate::fetch::Fetch`] implementation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// The response head arrived but reading the body failed.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Why a single asset did not make it to disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid asset URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_code_and_url() {
        let err = FetchError::Status {
            url: "https://example.com/a.css".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("https://example.com/a.css"));
    }

    #[test]
    fn fetch_error_is_transparent_inside_asset_error() {
        let err: AssetError = FetchError::Request("connection refused".into()).into();
        assert_eq!(err.to_string(), "request failed: connection refused");
    }

    #[test]
    fn write_error_names_the_path() {
        let err = AssetError::Write {
            path: PathBuf::from("/tmp/out/css/site.css"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/out/css/site.css"));
    }
}
