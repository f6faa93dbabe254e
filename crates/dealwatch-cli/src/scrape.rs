//! The scrape pipeline: fetch → extract → merge → write.
//!
//! Called from `main` once config and the HTTP client are ready. A fetch
//! failure aborts before the store is read, so the store is only ever
//! rewritten after a page was obtained.

use std::path::Path;

use anyhow::Context;
use dealwatch_scraper::{extract_page, DealsClient};
use dealwatch_store::{load_store, merge_deals, write_store, PriorStore};
use reqwest::Url;

/// Counts reported at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScrapeSummary {
    /// Deals extracted from the page, before dedup.
    pub extracted: usize,
    /// Listing items dropped because their embedded data was unusable.
    pub skipped: usize,
    /// Deals new to the store.
    pub added: usize,
    /// Size of the store after the merge.
    pub total: usize,
    /// The previous store file was corrupt and has been replaced.
    pub store_reset: bool,
}

/// Scrapes `url` and merges its deals into the store at `store_path`.
///
/// When `dry_run` is `true` everything runs except the final write.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched, the store exists but
/// cannot be read, or the merged store cannot be written. A corrupt store
/// file is not an error: it is logged and treated as empty.
pub(crate) async fn run_scrape(
    client: &DealsClient,
    url: &str,
    store_path: &Path,
    dry_run: bool,
) -> anyhow::Result<ScrapeSummary> {
    let html = client
        .fetch_listing(url)
        .await
        .with_context(|| format!("failed to fetch listing page {url}"))?;

    let base = Url::parse(url).ok();
    let extraction = extract_page(&html, base.as_ref());
    let extracted = extraction.deals.len();
    if extracted == 0 {
        tracing::warn!(url, "no deals found on listing page");
    }

    let prior = load_store(store_path)?;
    let store_reset = prior.is_corrupt();
    if let PriorStore::Corrupt(e) = &prior {
        tracing::warn!(
            path = %store_path.display(),
            error = %e,
            "store file is not a valid deal list; starting from an empty store"
        );
    }

    let outcome = merge_deals(prior.into_deals(), extraction.deals);
    tracing::debug!(
        added = outcome.added,
        dropped = outcome.dropped,
        "merged into store"
    );

    if dry_run {
        println!(
            "dry-run: would add {} of {} deals to {} ({} total)",
            outcome.added,
            extracted,
            store_path.display(),
            outcome.deals.len()
        );
    } else {
        write_store(store_path, &outcome.deals)?;
    }

    Ok(ScrapeSummary {
        extracted,
        skipped: extraction.skipped,
        added: outcome.added,
        total: outcome.deals.len(),
        store_reset,
    })
}
