use anyhow::Result;
use clap::Parser;
use colored::*;

use site_snapshot::cli::MirrorCommand;
use site_snapshot::downloader::DownloadOutcome;
use site_snapshot::logging;
use site_snapshot::{AssetCategory, MirrorConfig, WebsiteMirror};

#[tokio::main]
async fn main() -> Result<()> {
    let args = MirrorCommand::parse();
    logging::init_logging();

    let config = MirrorConfig::from_current_dir()?;
    let mut mirror = WebsiteMirror::new(&args.url, config)?;
    let summary = mirror.mirror_website().await?;

    for category in AssetCategory::MIRRORED {
        let (ok, failed) = summary.count_for(category);
        println!("   {:<8} {} saved, {} failed", category.directory(), ok, failed);
    }
    for failure in summary.failures() {
        if let DownloadOutcome::Failure { url, reason, .. } = failure {
            println!("   {} {} ({})", "✗".red(), url, reason);
        }
    }

    println!(
        "✅ Page mirrored: {} assets saved, {} failed",
        summary.succeeded().to_string().green(),
        summary.failed().to_string().yellow()
    );
    println!("📁 Output directory: {}", summary.output_dir.display());
    Ok(())
}
