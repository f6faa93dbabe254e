//! HTTP client for deal listing pages.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::ScraperError;

/// Desktop browser identity sent with every listing request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
pub const REFERER: &str = "https://www.google.com/";

/// Fetches listing pages with a fixed set of browser-like request headers.
///
/// One request per call, no retries: any non-2xx status or transport
/// failure is returned to the caller as a [`ScraperError`].
pub struct DealsClient {
    client: Client,
}

impl DealsClient {
    /// Creates a `DealsClient` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches the raw HTML of a listing page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx response.
    /// - [`ScraperError::Http`] on network or TLS failure, or an unreadable body.
    pub async fn fetch_listing(&self, url: &str) -> Result<String, ScraperError> {
        let target = Self::listing_url(url)?;

        let response = self
            .client
            .get(target)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, ACCEPT_LANGUAGE)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "listing page fetched");
        Ok(body)
    }

    /// Parses and validates a listing URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the URL does not parse or its
    /// scheme is not `http`/`https`.
    pub(crate) fn listing_url(url: &str) -> Result<Url, ScraperError> {
        let parsed = Url::parse(url.trim()).map_err(|e| ScraperError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme \"{other}\""),
            }),
        }
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
