use anyhow::{anyhow, Context, Result};
use url::Url;

use crate::sanitize::sanitize_filename_or_fallback;

/// The page being mirrored. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteTarget {
    url: Url,
    origin: String,
    hostname: String,
}

impl SiteTarget {
    pub fn parse(input: &str) -> Result<Self> {
        let url =
            Url::parse(input).with_context(|| format!("Failed to parse target URL: {}", input))?;
        let hostname = url
            .host_str()
            .ok_or_else(|| anyhow!("Target URL has no host: {}", input))?
            .to_string();
        let origin = url.origin().ascii_serialization();

        Ok(Self { url, origin, hostname })
    }

    /// Scheme, host and non-default port, without a trailing slash.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// Directory name for this site's mirror, safe to use as one path component.
    pub fn directory_name(&self) -> String {
        sanitize_filename_or_fallback(&self.hostname)
    }
}
