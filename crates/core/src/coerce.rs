//! Lenient serde helpers for values typed in by operators.
//!
//! Weight fields arrive from forms as numbers, numeric strings, empty strings
//! or `null`; stored rows may carry `null` in nullable columns. These helpers
//! read all of those without failing the whole payload.

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

/// Deserialize an `f64` from a number, a numeric string, `""` or `null`.
///
/// Empty strings and `null` read as `0.0`. Non-finite values are rejected.
pub fn flexible_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<LooseNumber>::deserialize(deserializer)? {
        None => 0.0,
        Some(LooseNumber::Number(n)) => n,
        Some(LooseNumber::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed
                    .parse::<f64>()
                    .map_err(|_| de::Error::custom(format!("invalid number: {trimmed:?}")))?
            }
        }
    };

    if !value.is_finite() {
        return Err(de::Error::custom("number must be finite"));
    }
    Ok(value)
}

/// Deserialize `null` as `T::default()`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
