//! Dynamic value representation shared by mappings, records and SQL rows

use std::collections::HashMap;
use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

/// Format used when date-times cross the JSON boundary
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// String-keyed association used as a loosely structured record
pub type Mapping = HashMap<String, Value>;

/// Dynamically typed field value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    DateTime(NaiveDateTime),
    List(Vec<Value>),
    Map(Mapping),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in conversion errors
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    /// Converts into the JSON data model.
    ///
    /// Bytes become base64 strings and date-times use [`DATE_TIME_FORMAT`].
    /// Non-finite floats have no JSON representation and become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(v) => JsonValue::Bool(*v),
            Value::Int(v) => JsonValue::Number((*v).into()),
            Value::Float(v) => Number::from_f64(*v).map_or(JsonValue::Null, JsonValue::Number),
            Value::String(v) => JsonValue::String(v.clone()),
            Value::Bytes(v) => JsonValue::String(BASE64.encode(v)),
            Value::DateTime(v) => JsonValue::String(v.format(DATE_TIME_FORMAT).to_string()),
            Value::List(items) => JsonValue::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Builds a value from the JSON data model.
    ///
    /// Strings stay strings; dates and bytes are recovered by the typed
    /// conversions when a field asks for them.
    pub fn from_json(json: JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(v) => Value::Bool(v),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(items.into_iter().map(Value::from_json).collect()),
            JsonValue::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v.format(DATE_TIME_FORMAT)),
            Value::Bytes(_) | Value::List(_) | Value::Map(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Value::from_json)
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        Value::from_json(json)
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        value.to_json()
    }
}
