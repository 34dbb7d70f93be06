//! JSON bridge between serde types, mappings and records
//!
//! Conversions that direct field copying cannot express (date-times held as
//! strings, nested structures) are routed through a JSON round-trip.

pub mod bean;
pub mod map;

pub use bean::JsonBean;
pub use map::JsonMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::types::{Mapping, Value};

pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

pub fn from_json_str<T: DeserializeOwned>(json: &str) -> Result<T> {
    Ok(serde_json::from_str(json)?)
}

pub fn from_json_slice<T: DeserializeOwned>(json: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(json)?)
}

/// JSON object text of `mapping`
pub fn mapping_to_json(mapping: &Mapping) -> Result<String> {
    Ok(serde_json::to_string(&mapping_to_json_value(mapping))?)
}

/// Parses a JSON object into a mapping; any other JSON shape is rejected
pub fn json_to_mapping(json: &str) -> Result<Mapping> {
    match Value::from_json(serde_json::from_str(json)?) {
        Value::Map(map) => Ok(map),
        other => Err(Error::invalid_argument(format!(
            "expected a JSON object, found {}",
            other.kind()
        ))),
    }
}

pub(crate) fn mapping_to_json_value(mapping: &Mapping) -> JsonValue {
    JsonValue::Object(
        mapping
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}

/// `#[serde(with = "water::json::date_format")]` for `NaiveDateTime` fields
/// written as `YYYY-MM-DD HH:MM:SS`, the shape mappings use for date-times
pub mod date_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::types::DATE_TIME_FORMAT;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(DATE_TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, DATE_TIME_FORMAT).map_err(de::Error::custom)
    }
}
