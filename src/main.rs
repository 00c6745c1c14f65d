mod collector;
mod models;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::Level;

use collector::{log, CollectorOptions, LoadOptions, MapsReviewCollector};

/// Collect reviews from a Google Maps place listing into a text log
#[derive(Parser)]
#[command(name = "review-scout")]
#[command(about = "Google Maps review collector")]
struct Cli {
    /// Fully-formed Google Maps place URL
    url: String,

    /// File the collected reviews are written to
    #[arg(long, default_value = "reviews.txt")]
    output: PathBuf,

    /// Re-sort reviews by newest before collecting
    #[arg(long)]
    sort_newest: bool,

    /// Run Chrome with a visible window
    #[arg(long)]
    headed: bool,

    /// Path to the Chrome/Chromium binary (autodetected if omitted)
    #[arg(long)]
    chrome: Option<PathBuf>,

    /// Seconds to wait for the review panel (0 waits indefinitely)
    #[arg(long, default_value_t = 10)]
    page_timeout: u64,

    /// Seconds allowed for scrolling through reviews (0 scrolls until done)
    #[arg(long, default_value_t = 100)]
    scroll_timeout: u64,

    /// Milliseconds between checks while polling the page
    #[arg(long, default_value_t = 100)]
    poll_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    let mut collector = MapsReviewCollector::new(CollectorOptions {
        headless: !cli.headed,
        chrome_path: cli.chrome,
    })?;

    let opts = LoadOptions {
        page_timeout_secs: cli.page_timeout,
        scroll_timeout_secs: cli.scroll_timeout,
        poll_interval_ms: cli.poll_interval,
        sort_by_newest: cli.sort_newest,
    };
    collector.load_page(&cli.url, &opts)?;

    let reviews = collector.extract_reviews()?;
    log::write_reviews(&cli.output, &reviews).await?;

    Ok(())
}
