mod scrape;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dealwatch")]
#[command(about = "Scrape a deals listing page into a deduplicated JSON store")]
struct Cli {
    /// Listing page to scrape. Defaults to `DEALWATCH_LISTING_URL`.
    url: Option<String>,

    /// Store file to merge into. Defaults to `DEALWATCH_STORE_PATH`.
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Fetch and merge, but do not write the store.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = dealwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let url = cli.url.unwrap_or_else(|| config.listing_url.clone());
    let store_path = cli.store.unwrap_or_else(|| config.store_path.clone());

    let client = dealwatch_scraper::DealsClient::new(config.request_timeout_secs)
        .map_err(|e| anyhow::anyhow!("failed to build deals client: {e}"))?;

    // A failed scrape is reported, not propagated: the store is left as it
    // was and the process still exits cleanly.
    match scrape::run_scrape(&client, &url, &store_path, cli.dry_run).await {
        Ok(summary) => tracing::info!(
            url = %url,
            store = %store_path.display(),
            extracted = summary.extracted,
            skipped = summary.skipped,
            added = summary.added,
            total = summary.total,
            store_reset = summary.store_reset,
            "scrape complete"
        ),
        Err(e) => tracing::error!(url = %url, error = %format!("{e:#}"), "scrape failed"),
    }

    Ok(())
}
