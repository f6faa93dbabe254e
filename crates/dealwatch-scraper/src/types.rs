//! Shapes of the JSON blob each listing item embeds in its `data-vue2` attribute.
//!
//! ## Observed shape (dealabs.com group listings)
//!
//! ```json
//! { "name": "ThreadMainListItemNormalizer",
//!   "props": { "thread": {
//!       "threadId": 2864112,
//!       "title": "Lego Technic 42143 Ferrari Daytona SP3",
//!       "price": 299.99,
//!       "nextBestPrice": 449.99,
//!       "temperature": 512.37,
//!       "commentCount": 27,
//!       "publishedAt": 1714551000,
//!       "mainImage": { "slotId": "4195", "name": "4195721_1", "ext": "jpg" } } } }
//! ```
//!
//! The payload is the site's front-end state, not a published API, so no
//! field is guaranteed. Every field here is optional and deserialized with
//! [`lenient`]: a value of the wrong JSON type becomes `None` instead of
//! failing the whole item. Numbers sometimes arrive as strings (`"299.99"`),
//! which [`LooseNumber`] accepts.

use dealwatch_core::de::lenient;
use dealwatch_core::DealId;
use serde::Deserialize;

/// Top-level object parsed from a `data-vue2` attribute.
#[derive(Debug, Default, Deserialize)]
pub struct ThreadBlob {
    #[serde(default, deserialize_with = "lenient")]
    pub props: Option<BlobProps>,
}

impl ThreadBlob {
    /// Returns the thread payload, if the blob carries one.
    #[must_use]
    pub fn thread(&self) -> Option<&RawThread> {
        self.props.as_ref()?.thread.as_ref()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BlobProps {
    #[serde(default, deserialize_with = "lenient")]
    pub thread: Option<RawThread>,
}

/// Per-deal data as embedded by the listing page.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawThread {
    #[serde(default, deserialize_with = "lenient")]
    pub thread_id: Option<DealId>,

    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,

    /// Current offer price.
    #[serde(default, deserialize_with = "lenient")]
    pub price: Option<LooseNumber>,

    /// Best price found elsewhere; the site's "retail" reference.
    #[serde(default, deserialize_with = "lenient")]
    pub next_best_price: Option<LooseNumber>,

    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<LooseNumber>,

    #[serde(default, deserialize_with = "lenient")]
    pub comment_count: Option<LooseNumber>,

    /// Unix epoch seconds.
    #[serde(default, deserialize_with = "lenient")]
    pub published_at: Option<LooseNumber>,

    #[serde(default, deserialize_with = "lenient")]
    pub main_image: Option<RawImage>,
}

/// Image descriptor; the three parts slot into the CDN URL template.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImage {
    #[serde(default, deserialize_with = "lenient")]
    pub slot_id: Option<StringOrNumber>,

    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<StringOrNumber>,

    #[serde(default, deserialize_with = "lenient")]
    pub ext: Option<StringOrNumber>,
}

/// A JSON number, or a string that may hold one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    /// Returns the finite numeric value, or `None` for non-numeric text.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// A path segment that may arrive as either a string or a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    /// Returns the trimmed text form, or `None` when it is empty.
    #[must_use]
    pub fn as_segment(&self) -> Option<String> {
        let text = match self {
            StringOrNumber::Text(s) => s.trim().to_owned(),
            StringOrNumber::Number(n) => n.to_string(),
        };
        (!text.is_empty()).then_some(text)
    }
}
