//! Serde helpers for JSON that is not under our control.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an optional field, mapping any type mismatch (or `null`) to `None`.
///
/// The value is buffered as JSON first, so a bad field never fails the
/// enclosing object.
///
/// # Errors
///
/// Only fails if the input is not well-formed JSON.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}
