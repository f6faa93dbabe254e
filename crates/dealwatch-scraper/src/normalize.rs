//! Normalization from the raw embedded thread payload to [`dealwatch_core::Deal`].
//!
//! Every derived field degrades to `None` on missing or unusable input;
//! normalization itself never fails.

use chrono::{DateTime, SecondsFormat};
use dealwatch_core::{Deal, DealId};

use crate::types::{LooseNumber, RawImage, RawThread};

/// CDN prefix for deal thumbnails. The full URL is
/// `{base}/{slotId}/{name}/re/300x300/qt/60/{name}.{ext}`.
const IMAGE_URL_BASE: &str = "https://static-pepper.dealabs.com/threads/raw";

/// Normalizes one raw thread payload into a [`Deal`].
///
/// `link` is left as `None`; the page extractor fills it from the item markup.
#[must_use]
pub fn normalize_thread(thread: &RawThread) -> Deal {
    let price = thread.price.as_ref().and_then(LooseNumber::as_f64);
    let retail = thread.next_best_price.as_ref().and_then(LooseNumber::as_f64);

    let comments = thread
        .comment_count
        .as_ref()
        .and_then(LooseNumber::as_f64)
        .map_or(0, comment_count);

    // The site sends "" rather than omitting these on some sponsored items.
    let id = thread
        .thread_id
        .clone()
        .filter(|id| !matches!(id, DealId::Text(s) if s.trim().is_empty()));
    let title = thread.title.clone().filter(|t| !t.trim().is_empty());

    Deal {
        link: None,
        retail,
        price,
        discount: compute_discount(price, retail),
        temperature: thread.temperature.as_ref().and_then(LooseNumber::as_f64),
        image: thread.main_image.as_ref().and_then(image_url),
        comments,
        published: thread
            .published_at
            .as_ref()
            .and_then(LooseNumber::as_f64)
            .and_then(epoch_to_iso),
        title,
        id,
    }
}

/// Percent saved against `retail`, rounded half away from zero.
///
/// Returns `None` when either price is missing or `retail` is zero. A price
/// above retail yields a negative discount.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn compute_discount(price: Option<f64>, retail: Option<f64>) -> Option<i64> {
    let (price, retail) = (price?, retail?);
    if retail == 0.0 {
        return None;
    }

    let percent = ((1.0 - price / retail) * 100.0).round();
    if !percent.is_finite() {
        return None;
    }

    #[allow(clippy::cast_possible_truncation)]
    let percent = percent as i64;
    Some(percent)
}

/// Renders Unix epoch seconds as ISO-8601 UTC with millisecond precision,
/// e.g. `1714551000` → `"2024-05-01T08:10:00.000Z"`.
fn epoch_to_iso(epoch_secs: f64) -> Option<String> {
    #[allow(clippy::cast_possible_truncation)]
    let millis = (epoch_secs * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Builds the thumbnail URL. All three descriptor parts must be present.
fn image_url(image: &RawImage) -> Option<String> {
    let slot_id = image.slot_id.as_ref()?.as_segment()?;
    let name = image.name.as_ref()?.as_segment()?;
    let ext = image.ext.as_ref()?.as_segment()?;
    Some(format!(
        "{IMAGE_URL_BASE}/{slot_id}/{name}/re/300x300/qt/60/{name}.{ext}"
    ))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn comment_count(raw: f64) -> u64 {
    if raw <= 0.0 {
        0
    } else {
        raw.trunc() as u64
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
