use crate::site::SiteTarget;

/// Turns a raw `href`/`src` value into an absolute URL.
///
/// First match wins:
/// 1. `//host/path` gets an `https:` scheme
/// 2. `/path` is joined to the site origin
/// 3. anything not starting with `http` is joined to `origin/`
/// 4. everything else is returned as is
///
/// Relative references resolve against the origin root, not against the
/// page's own directory: `https://a.com/blog/` with `img/x.png` yields
/// `https://a.com/img/x.png`. Nothing is validated here; a bad result only
/// shows up when it is fetched.
pub fn resolve(reference: &str, site: &SiteTarget) -> String {
    if reference.starts_with("//") {
        format!("https:{}", reference)
    } else if reference.starts_with('/') {
        format!("{}{}", site.origin(), reference)
    } else if !reference.starts_with("http") {
        format!("{}/{}", site.origin(), reference)
    } else {
        reference.to_string()
    }
}
