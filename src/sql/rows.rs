//! Query results and their conversion into mappings and records

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::trace;

use crate::bean::writable_fields;
use crate::error::{Error, Result};
use crate::types::{FieldDescriptor, Mapping, Record, TypeTag, Value};
use crate::utils::underline_to_camel;

/// Column labels and row values returned by a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryRows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryRows {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One mapping per row, keyed by column label. `camel` turns
    /// `created_at` into `createdAt`.
    pub fn to_mappings(&self, camel: bool) -> Vec<Mapping> {
        let keys: Vec<String> = self
            .columns
            .iter()
            .map(|column| if camel { underline_to_camel(column) } else { column.clone() })
            .collect();

        self.rows
            .iter()
            .map(|row| keys.iter().cloned().zip(row.iter().cloned()).collect())
            .collect()
    }

    /// One default-constructed `T` per row.
    ///
    /// A column fills the writable field named like its label, or failing
    /// that like its camel-cased label. Unmatched columns and null cells are
    /// skipped.
    pub fn to_records<T: Record + Default>(&self) -> Result<Vec<T>> {
        let probe = T::default();
        let descriptors = probe.descriptors();
        let by_name: HashMap<&str, &FieldDescriptor> = writable_fields(&descriptors)
            .into_iter()
            .map(|field| (field.name.as_str(), field))
            .collect();

        let plan: Vec<Option<&FieldDescriptor>> = self
            .columns
            .iter()
            .map(|column| {
                by_name
                    .get(column.as_str())
                    .or_else(|| by_name.get(underline_to_camel(column).as_str()))
                    .copied()
            })
            .collect();
        trace!(
            matched = plan.iter().flatten().count(),
            columns = self.columns.len(),
            "Planned column to field mapping"
        );

        let mut records = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            let mut record = T::default();
            for (field, cell) in plan.iter().zip(row) {
                let Some(field) = field else { continue };
                if cell.is_null() {
                    continue;
                }
                record
                    .write(&field.name, coerce(cell.clone(), field.ty))
                    .map_err(|e| Error::property_copy(&field.name, e))?;
            }
            records.push(record);
        }
        Ok(records)
    }
}

fn is_one_of<A: 'static, B: 'static>(ty: TypeTag) -> bool {
    ty == TypeTag::of::<A>() || ty == TypeTag::of::<B>()
}

macro_rules! is_plain_or_optional {
    ($ty:expr; $($t:ty),+) => {
        $(is_one_of::<$t, Option<$t>>($ty))||+
    };
}

fn is_integer(ty: TypeTag) -> bool {
    is_plain_or_optional!(ty; i8, i16, i32, i64, u8, u16, u32, u64, usize)
}

fn is_float(ty: TypeTag) -> bool {
    is_plain_or_optional!(ty; f32, f64)
}

/// Reals truncate toward zero; text is parsed as an integer, then as a real.
/// Integer text above `i64::MAX` stays text for the wide unsigned fields.
fn to_integer(cell: Value) -> Value {
    match cell {
        Value::Float(v) if v.is_finite() => Value::Int(v.trunc() as i64),
        Value::String(text) => {
            let trimmed = text.trim();
            if let Ok(v) = trimmed.parse::<i64>() {
                return Value::Int(v);
            }
            if trimmed.parse::<u64>().is_ok() {
                return Value::String(trimmed.to_string());
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Value::Int(v.trunc() as i64),
                _ => Value::String(text),
            }
        }
        other => other,
    }
}

/// Adjusts a driver value to the field's declared type where the storage
/// class loses information: booleans stored as integers, numbers stored as
/// reals or text, text read into character fields, and scalars read into
/// string fields.
fn coerce(cell: Value, ty: TypeTag) -> Value {
    if is_integer(ty) {
        return to_integer(cell);
    } else if is_float(ty) {
        if let Value::String(text) = &cell {
            if let Ok(v) = text.trim().parse::<f64>() {
                return Value::Float(v);
            }
        }
    } else if is_one_of::<bool, Option<bool>>(ty) {
        if let Value::Int(v) = cell {
            return Value::Bool(v != 0);
        }
    } else if is_one_of::<char, Option<char>>(ty) {
        if let Value::String(text) = &cell {
            return Value::String(text.chars().next().unwrap_or(' ').to_string());
        }
    } else if is_one_of::<String, Option<String>>(ty) {
        return match cell {
            Value::String(_) => cell,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::DateTime(_) => Value::String(cell.to_string()),
            Value::Bytes(bytes) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
            other => other,
        };
    } else if is_one_of::<NaiveDateTime, Option<NaiveDateTime>>(ty) {
        if let Value::Int(secs) = cell {
            if let Some(at) = chrono::DateTime::from_timestamp(secs, 0) {
                return Value::DateTime(at.naive_utc());
            }
        }
    }
    cell
}
