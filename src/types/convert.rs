//! Conversions between concrete Rust field types and [`Value`]

use chrono::{NaiveDate, NaiveDateTime};

use super::value::{Mapping, Value, DATE_TIME_FORMAT};
use crate::error::ValueError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Converts a field value into its dynamic representation
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Recovers a concrete field value from its dynamic representation.
///
/// Conversions are strict: the only accepted cross-variant inputs are
/// integers for float fields, strings for date fields (the form dates
/// take after a JSON round-trip), and decimal strings for `u64`/`usize`
/// fields, which store magnitudes beyond `i64::MAX` that way.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, ValueError>;
}

fn mismatch(expected: &'static str, found: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        found: found.kind(),
    }
}

macro_rules! int_conversions {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    Value::Int(i64::from(self))
                }
            }

            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Int(v) => <$t>::try_from(v).map_err(|_| ValueError::OutOfRange {
                            value: v.to_string(),
                            target: stringify!($t),
                        }),
                        other => Err(mismatch(stringify!($t), &other)),
                    }
                }
            }
        )*
    };
}

int_conversions!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! wide_unsigned_conversions {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntoValue for $t {
                fn into_value(self) -> Value {
                    // Beyond i64::MAX the exact digits are kept as text
                    i64::try_from(self).map_or_else(|_| Value::String(self.to_string()), Value::Int)
                }
            }

            impl FromValue for $t {
                fn from_value(value: Value) -> Result<Self, ValueError> {
                    match value {
                        Value::Int(v) => <$t>::try_from(v).map_err(|_| ValueError::OutOfRange {
                            value: v.to_string(),
                            target: stringify!($t),
                        }),
                        Value::String(s) => s.parse().map_err(|_| ValueError::Parse {
                            value: s,
                            target: stringify!($t),
                        }),
                        other => Err(mismatch(stringify!($t), &other)),
                    }
                }
            }
        )*
    };
}

wide_unsigned_conversions!(u64, usize);

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(v) => Ok(v),
            Value::Int(v) => Ok(v as f64),
            other => Err(mismatch("f64", &other)),
        }
    }
}

impl IntoValue for f32 {
    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }
}

impl FromValue for f32 {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(v) => Ok(v as f32),
            Value::Int(v) => Ok(v as f32),
            other => Err(mismatch("f32", &other)),
        }
    }
}

impl IntoValue for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(mismatch("bool", &other)),
        }
    }
}

impl IntoValue for char {
    fn into_value(self) -> Value {
        Value::String(self.to_string())
    }
}

impl FromValue for char {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::String(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ValueError::Parse {
                        value: s,
                        target: "char",
                    }),
                }
            }
            other => Err(mismatch("char", &other)),
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> Value {
        Value::String(self.to_owned())
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl IntoValue for NaiveDateTime {
    fn into_value(self) -> Value {
        Value::DateTime(self)
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::DateTime(v) => Ok(v),
            Value::String(s) => NaiveDateTime::parse_from_str(&s, DATE_TIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f"))
                .map_err(|_| ValueError::Parse {
                    value: s,
                    target: "datetime",
                }),
            other => Err(mismatch("datetime", &other)),
        }
    }
}

impl IntoValue for NaiveDate {
    fn into_value(self) -> Value {
        Value::String(self.format(DATE_FORMAT).to_string())
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::DateTime(v) => Ok(v.date()),
            Value::String(s) => NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(|_| ValueError::Parse {
                value: s,
                target: "date",
            }),
            other => Err(mismatch("date", &other)),
        }
    }
}

impl<T: IntoValue> IntoValue for Vec<T> {
    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(IntoValue::into_value).collect())
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            Value::Bytes(bytes) => bytes
                .into_iter()
                .map(|b| T::from_value(Value::Int(i64::from(b))))
                .collect(),
            other => Err(mismatch("list", &other)),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> Value {
        self.map_or(Value::Null, IntoValue::into_value)
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl IntoValue for Mapping {
    fn into_value(self) -> Value {
        Value::Map(self)
    }
}

impl FromValue for Mapping {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Map(v) => Ok(v),
            other => Err(mismatch("map", &other)),
        }
    }
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, ValueError> {
        Ok(value)
    }
}
