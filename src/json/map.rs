//! Mapping wrapper with lenient typed getters

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Mapping, Value};

/// A [`Mapping`] read through typed accessors.
///
/// Every getter returns `Ok(None)` for absent and null keys. Strings are
/// parsed when a number or boolean is requested.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonMap(Mapping);

fn unparsable(key: &str, value: &Value, target: &str) -> Error {
    Error::invalid_argument(format!("value of `{}` ({}) is not a valid {}", key, value, target))
}

impl JsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_inner(self) -> Mapping {
        self.0
    }

    fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    /// Strings as they are; other values in their display form
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.present(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        match value {
            Value::Int(v) => Ok(Some(*v)),
            Value::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(Some(*v as i64)),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| unparsable(key, value, "integer")),
            other => Err(unparsable(key, other, "integer")),
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        match value {
            Value::Int(v) => Ok(Some(*v as f64)),
            Value::Float(v) => Ok(Some(*v)),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| unparsable(key, value, "number")),
            other => Err(unparsable(key, other, "number")),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(value) = self.present(key) else {
            return Ok(None);
        };
        match value {
            Value::Bool(v) => Ok(Some(*v)),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(unparsable(key, value, "boolean")),
            },
            other => Err(unparsable(key, other, "boolean")),
        }
    }

    /// Deserializes the value under `key` into `T`
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => Ok(Some(serde_json::from_value(value.to_json())?)),
        }
    }
}

impl From<Mapping> for JsonMap {
    fn from(map: Mapping) -> Self {
        Self(map)
    }
}

impl Deref for JsonMap {
    type Target = Mapping;

    fn deref(&self) -> &Mapping {
        &self.0
    }
}

impl DerefMut for JsonMap {
    fn deref_mut(&mut self) -> &mut Mapping {
        &mut self.0
    }
}
