use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Directory, under the working directory, that holds one mirror per host.
pub const DEFAULT_OUTPUT_ROOT: &str = "downloaded_sites";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Parent of the per-host mirror directory.
    pub output_root: PathBuf,
    /// Per-request timeout for the page and every asset.
    pub request_timeout: Duration,
    pub show_progress: bool,
}

impl MirrorConfig {
    /// `./downloaded_sites` relative to the current working directory.
    pub fn from_current_dir() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Ok(Self {
            output_root: cwd.join(DEFAULT_OUTPUT_ROOT),
            ..Self::default()
        })
    }

    pub fn with_output_root(mut self, output_root: impl Into<PathBuf>) -> Self {
        self.output_root = output_root.into();
        self
    }

    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            request_timeout: DEFAULT_TIMEOUT,
            show_progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = MirrorConfig::default();
        assert_eq!(config.output_root, PathBuf::from("downloaded_sites"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.show_progress);
    }

    #[test]
    fn current_dir_config_is_absolute() {
        let config = MirrorConfig::from_current_dir().unwrap();
        assert!(config.output_root.is_absolute());
        assert!(config.output_root.ends_with(DEFAULT_OUTPUT_ROOT));
    }

    #[test]
    fn builder_overrides() {
        let config = MirrorConfig::default().with_output_root("/tmp/mirrors").quiet();
        assert_eq!(config.output_root, PathBuf::from("/tmp/mirrors"));
        assert!(!config.show_progress);
    }
}
