//! Stored record shapes shared with the admin surface.
//!
//! # Responsibility
//! - Define the JSON records kept under the storage keys in `crate::keys`.
//! - Tolerate the loose shapes older admin builds wrote (missing or `null`
//!   fields, numbers where text is expected, numeric strings) without
//!   rejecting the whole record.
//!
//! # Invariants
//! - Field names serialize in camelCase to match stored JSON.
//! - Unknown enum values decode into an explicit catch-all variant.

pub mod login;
pub mod message;
pub mod profile;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decodes an integer from a JSON number or a numeric string.
///
/// Fractions are truncated; anything else decodes as `0`.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map(|float| float as i64)
            .unwrap_or(0),
        _ => 0,
    })
}

fn scalar_text(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(text) => Some(text),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Decodes text from a string, number or bool; `null` and containers give `""`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_text(value).unwrap_or_default())
}

/// Like `lenient_string`, with `null` and containers decoding as `None`.
pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(scalar_text(value))
}

/// Decodes `T`, falling back to `T::default()` for any value of the wrong shape.
pub(crate) fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Returns the value when it holds non-empty text.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}
