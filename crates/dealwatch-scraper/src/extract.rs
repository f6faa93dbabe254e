//! Deal extraction from a listing page's HTML.
//!
//! Each deal on a listing page is an `<article>` inside the thread list. The
//! article carries the detail-page link on an anchor and the deal data as a
//! JSON blob in the `data-vue2` attribute of a `div.js-vue2` mount point:
//!
//! ```html
//! <div class="js-threadList">
//!   <article id="thread_2864112">
//!     <a data-t="threadLink" href="https://www.dealabs.com/bons-plans/...-2864112">…</a>
//!     <div class="js-vue2" data-vue2="{&quot;props&quot;:{&quot;thread&quot;:{…}}}"></div>
//!   </article>
//! </div>
//! ```
//!
//! Markup knowledge lives here only; [`crate::normalize`] never sees HTML.

use dealwatch_core::Deal;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::normalize::normalize_thread;
use crate::types::ThreadBlob;

const CONTAINER_SELECTOR: &str = "div.js-threadList article";
const LINK_SELECTOR: &str = r#"a[data-t="threadLink"]"#;
const BLOB_SELECTOR: &str = "div.js-vue2";
const BLOB_ATTR: &str = "data-vue2";

/// Result of extracting one listing page.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Deals in document order. Not deduplicated.
    pub deals: Vec<Deal>,
    /// Containers dropped because their data blob was missing or unusable.
    pub skipped: usize,
}

/// Why a single container could not be turned into a deal.
#[derive(Debug)]
enum SkipReason {
    MissingBlob,
    InvalidJson(serde_json::Error),
    MissingThread,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingBlob => write!(f, "no {BLOB_ATTR} attribute"),
            SkipReason::InvalidJson(e) => write!(f, "{BLOB_ATTR} is not valid JSON: {e}"),
            SkipReason::MissingThread => write!(f, "{BLOB_ATTR} has no props.thread object"),
        }
    }
}

/// Extracts every deal on the page, leaving links exactly as written in the markup.
#[must_use]
pub fn extract_deals(html: &str) -> Vec<Deal> {
    extract_page(html, None).deals
}

/// Extracts every deal on the page, resolving relative links against `base`.
#[must_use]
pub fn extract_deals_with_base(html: &str, base: &Url) -> Vec<Deal> {
    extract_page(html, Some(base)).deals
}

/// Extracts every deal on the page along with the number of skipped containers.
///
/// A container whose blob is missing or malformed is logged and skipped; it
/// never aborts extraction of the remaining containers.
///
/// # Panics
///
/// Does not panic: the selectors are constants known to parse.
#[must_use]
pub fn extract_page(html: &str, base: Option<&Url>) -> Extraction {
    let container_sel = Selector::parse(CONTAINER_SELECTOR).expect("valid container selector");
    let link_sel = Selector::parse(LINK_SELECTOR).expect("valid link selector");
    let blob_sel = Selector::parse(BLOB_SELECTOR).expect("valid blob selector");

    let document = Html::parse_document(html);
    let mut extraction = Extraction::default();

    for (index, container) in document.select(&container_sel).enumerate() {
        match extract_container(container, &link_sel, &blob_sel, base) {
            Ok(deal) => extraction.deals.push(deal),
            Err(reason) => {
                tracing::warn!(index, reason = %reason, "skipping listing item");
                extraction.skipped += 1;
            }
        }
    }

    tracing::debug!(
        extracted = extraction.deals.len(),
        skipped = extraction.skipped,
        "listing page extracted"
    );
    extraction
}

fn extract_container(
    container: ElementRef<'_>,
    link_sel: &Selector,
    blob_sel: &Selector,
    base: Option<&Url>,
) -> Result<Deal, SkipReason> {
    let link = container
        .select(link_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(|href| resolve_link(href, base));

    let raw = container
        .select(blob_sel)
        .next()
        .and_then(|div| div.value().attr(BLOB_ATTR))
        .ok_or(SkipReason::MissingBlob)?;

    let blob: ThreadBlob = serde_json::from_str(raw).map_err(SkipReason::InvalidJson)?;
    let thread = blob.thread().ok_or(SkipReason::MissingThread)?;

    let mut deal = normalize_thread(thread);
    // The DOM link wins over anything derived from the payload.
    deal.link = link.or(deal.link);
    Ok(deal)
}

/// Resolves `href` against `base`. Without a base, or if joining fails, the
/// href is returned as written.
fn resolve_link(href: &str, base: Option<&Url>) -> String {
    match base.map(|b| b.join(href)) {
        Some(Ok(url)) => url.to_string(),
        Some(Err(e)) => {
            tracing::debug!(href, error = %e, "could not resolve deal link; keeping it verbatim");
            href.to_owned()
        }
        None => href.to_owned(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
