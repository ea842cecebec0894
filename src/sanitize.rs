//! Filesystem-safe names for mirrored assets.
//!
//! [`local_path_for`] is the only place a local filename is derived. The
//! downloader uses it to pick where bytes land and the rewriter uses it to
//! pick what the page points at, so the two always agree.

use url::Url;

use crate::html_parser::AssetCategory;

/// Name used when a basename sanitizes down to nothing.
pub const FALLBACK_FILENAME: &str = "index";

const NAME_MAX: usize = 255;

const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM0", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
    "COM8", "COM9", "LPT0", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Strips characters that are unsafe in a single path component.
///
/// - Removes `/ ? < > \ : * | "` and control characters
/// - A name made only of dots (`.`, `..`) becomes empty
/// - Windows device names (`CON`, `lpt1.txt`, ...) become empty
/// - Trailing dots and spaces are trimmed
/// - Limits length to 255 bytes
///
/// May return an empty string; see [`sanitize_filename_or_fallback`].
pub fn sanitize_filename(name: &str) -> String {
    let stripped: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '?' | '<' | '>' | '\\' | ':' | '*' | '|' | '"'))
        .filter(|c| !c.is_control())
        .collect();

    if stripped.chars().all(|c| c == '.') {
        return String::new();
    }

    let stem = stripped.split('.').next().unwrap_or_default();
    if WINDOWS_RESERVED
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
    {
        return String::new();
    }

    let trimmed = stripped.trim_end_matches(['.', ' ']);
    truncate_to_char_boundary(trimmed, NAME_MAX).to_string()
}

/// Like [`sanitize_filename`] but never empty.
pub fn sanitize_filename_or_fallback(name: &str) -> String {
    let sanitized = sanitize_filename(name);
    if sanitized.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}

fn truncate_to_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}

/// Last non-empty `/`-separated segment of `path`, ignoring trailing slashes.
pub fn basename(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Basename of the path component of an absolute URL.
///
/// Falls back to cutting the raw string at its query or fragment when the
/// `url` crate refuses it, so a malformed reference still gets a stable name.
pub fn url_basename(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => basename(parsed.path()).to_string(),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            basename(&url[..end]).to_string()
        }
    }
}

/// Mirror-relative path (`css/site.css`) for an absolute asset URL.
pub fn local_path_for(category: AssetCategory, resolved_url: &str) -> String {
    let filename = sanitize_filename_or_fallback(&url_basename(resolved_url));
    format!("{}/{}", category.directory(), filename)
}
