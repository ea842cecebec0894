use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "site-snapshot",
    about = "Snapshot a web page and its stylesheets, scripts and images",
    version,
    long_about = "Downloads a single page, mirrors the stylesheets, scripts and images it references into ./downloaded_sites/<host>/ and rewrites the page to load them from there."
)]
pub struct MirrorCommand {
    /// The URL of the page to mirror
    #[arg(required = true)]
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url() {
        let args = MirrorCommand::try_parse_from(["site-snapshot", "https://example.com"]).unwrap();
        assert_eq!(args.url, "https://example.com");
    }

    #[test]
    fn test_parse_missing_url() {
        let result = MirrorCommand::try_parse_from(["site-snapshot"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_flags() {
        let result =
            MirrorCommand::try_parse_from(["site-snapshot", "https://example.com", "-o", "./out"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_extra_positional() {
        let result =
            MirrorCommand::try_parse_from(["site-snapshot", "https://a.com", "https://b.com"]);
        assert!(result.is_err());
    }
}
