//! Serde helpers for nutrient fields that are either a number or the
//! literal string `"N/A"` on the wire.

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_f64(*v),
        None => serializer.serialize_str("N/A"),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Str(String),
        Null,
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Some(n),
        // Some catalog payloads carry numbers as strings; anything
        // non-numeric (including "N/A") is treated as absent.
        Raw::Str(s) => s.trim().parse::<f64>().ok(),
        Raw::Null => None,
    })
}
