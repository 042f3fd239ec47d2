//! Lenient field deserializers for the upstream datasets.
//!
//! The published JSON is not consistent about types: ids show up as both
//! strings and numbers, coordinates as numeric strings or bare numbers, and
//! any field may be `null`. These helpers fold all of that into strings at the
//! load boundary so the rest of the crate only sees one shape.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

/// Deserialize a string, number or boolean into a `String`; `null` becomes
/// the empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_string).unwrap_or_default())
}

/// Like [`string_or_number`] but keeps `null` and empty strings as `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Scalar> = Option::deserialize(deserializer)?;
    Ok(value.map(Scalar::into_string).filter(|s| !s.is_empty()))
}
