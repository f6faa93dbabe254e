use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::de::lenient;

/// Identifier of the underlying offer on the deals site.
///
/// Kept in whichever JSON shape the site sent it: the listing data carries
/// numeric ids, but string ids have been observed in older payloads. Two ids
/// only compare equal when both the shape and the value match.
///
/// Numeric ids accept anything integral that JSON can carry: negative,
/// beyond `i64::MAX`, or written as a whole float such as `1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum DealId {
    Int(i128),
    Text(String),
}

impl fmt::Display for DealId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DealId::Int(id) => write!(f, "{id}"),
            DealId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for DealId {
    fn from(id: i64) -> Self {
        DealId::Int(id.into())
    }
}

impl From<&str> for DealId {
    fn from(id: &str) -> Self {
        DealId::Text(id.to_owned())
    }
}

impl<'de> Deserialize<'de> for DealId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DealIdVisitor)
    }
}

struct DealIdVisitor;

impl Visitor<'_> for DealIdVisitor {
    type Value = DealId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<DealId, E> {
        Ok(DealId::Int(v.into()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<DealId, E> {
        Ok(DealId::Int(v.into()))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<DealId, E> {
        Ok(DealId::Int(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<DealId, E> {
        i128::try_from(v)
            .map(DealId::Int)
            .map_err(|_| E::invalid_value(Unexpected::Other("integer above i128::MAX"), &self))
    }

    #[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
    fn visit_f64<E: de::Error>(self, v: f64) -> Result<DealId, E> {
        // 2^127: every integral f64 below this fits in an i128.
        let limit = 2f64.powi(127);
        if v.is_finite() && v.trunc() == v && v.abs() < limit {
            Ok(DealId::Int(v as i128))
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<DealId, E> {
        Ok(DealId::Text(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<DealId, E> {
        Ok(DealId::Text(v))
    }
}

/// A deal scraped from a listing page, normalized for storage.
///
/// Field order is the on-disk order of the persisted JSON objects.
///
/// Loading is tolerant: the store file may have been edited by hand or
/// written by an older version, so a missing field or a value of the wrong
/// type loads as `None` (or `0` for `comments`) instead of rejecting the
/// whole record. A fractional `discount` is rounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deal {
    /// Absolute URL of the offer detail page.
    #[serde(deserialize_with = "lenient")]
    pub link: Option<String>,
    /// Reference ("next best") price the discount is measured against.
    #[serde(deserialize_with = "lenient")]
    pub retail: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub price: Option<f64>,
    /// Percent saved relative to `retail`, rounded to the nearest integer.
    #[serde(deserialize_with = "rounded")]
    pub discount: Option<i64>,
    /// Community vote score ("temperature") of the deal.
    #[serde(deserialize_with = "lenient")]
    pub temperature: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<String>,
    /// Comment count. Absent upstream means no activity, so this is `0`, not `None`.
    #[serde(deserialize_with = "count")]
    pub comments: u64,
    /// Publication time as ISO-8601 UTC, e.g. `"2024-03-01T08:30:00.000Z"`.
    #[serde(deserialize_with = "lenient")]
    pub published: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    /// `None` when the site omitted it; such deals are never deduplicated.
    #[serde(deserialize_with = "lenient")]
    pub id: Option<DealId>,
}

fn rounded<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = lenient(deserializer)?;
    #[allow(clippy::cast_possible_truncation)]
    let rounded = value.filter(|v| v.is_finite()).map(|v| v.round() as i64);
    Ok(rounded)
}

fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = lenient(deserializer)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = value
        .filter(|v| v.is_finite() && *v > 0.0)
        .map_or(0, |v| v.trunc() as u64);
    Ok(count)
}
