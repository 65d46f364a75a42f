//! Lenient serde helpers for the loosely typed fields the shop API returns.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<Option<f64>, E> {
        match self {
            NumberOrString::Number(n) => Ok(Some(n)),
            NumberOrString::String(s) if s.trim().is_empty() => Ok(None),
            NumberOrString::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| E::custom(format!("Invalid number: {:?}", s))),
        }
    }
}

/// Deserializes an optional amount sent either as a JSON number or a numeric
/// string (`12.5` or `"12.50"`).
pub mod flexible_f64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(value) => value.into_f64(),
            None => Ok(None),
        }
    }
}

/// Deserializes an optional count sent either as a JSON number or a numeric
/// string (`3` or `"3"`).
pub mod flexible_i64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(value) => match value.into_f64::<D::Error>()? {
                Some(n) if n.fract() == 0.0 => Ok(Some(n as i64)),
                Some(n) => Err(serde::de::Error::custom(format!(
                    "Expected a whole number, got {}",
                    n
                ))),
                None => Ok(None),
            },
            None => Ok(None),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

/// Deserializes an optional identifier sent either as a string or a number
/// (`"o1"` or `42`).
pub mod flexible_string {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(
            Option::<StringOrNumber>::deserialize(deserializer)?.map(|value| match value {
                StringOrNumber::String(s) => s,
                StringOrNumber::Number(n) => n.to_string(),
            }),
        )
    }
}

/// Text field of a raw record; numbers are rendered, other types ignored.
pub(crate) fn string_field(raw: &Map<String, Value>, key: &str) -> Option<String> {
    let value = raw.get(key)?.clone();
    flexible_string::deserialize(value).ok().flatten()
}

/// Amount field of a raw record; unparseable values read as absent.
pub(crate) fn f64_field(raw: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = raw.get(key)?.clone();
    flexible_f64::deserialize(value).ok().flatten()
}

/// Count field of a raw record; unparseable values read as absent.
pub(crate) fn i64_field(raw: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = raw.get(key)?.clone();
    flexible_i64::deserialize(value).ok().flatten()
}
