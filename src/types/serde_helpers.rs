//! Custom serde deserializers for flexible type handling
//!
//! The site is inconsistent about scalar types: counters arrive as JSON
//! numbers on some pages and as strings on others.

use serde::{Deserialize, Deserializer, de};

/// Parse an explicit boolean string: `"true"`, `"false"`, `"1"`, `"0"`
/// (case-insensitive, surrounding whitespace ignored).
///
/// Strings like "yes"/"no" and empty strings are NOT accepted.
pub fn parse_flexible_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Deserialize a counter that can be:
/// - JSON integer: `42`
/// - String: `"42"`, `" 42 "`, `"1,234"` (thousands separators are dropped)
pub fn deserialize_flexible_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexibleInt {
        Int(u64),
        String(String),
    }

    let value: Option<FlexibleInt> = Option::deserialize(deserializer)?;

    match value {
        None => Ok(None),
        Some(FlexibleInt::Int(i)) => u32::try_from(i)
            .map(Some)
            .map_err(|_| de::Error::custom(format!("counter out of range: {}", i))),
        Some(FlexibleInt::String(s)) => parse_counter(&s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid counter string: {}", s))),
    }
}

/// Parse a counter string as shown on the site
pub fn parse_counter(s: &str) -> Option<u32> {
    let digits: String = s.trim().chars().filter(|c| *c != ',').collect();
    digits.parse().ok()
}
