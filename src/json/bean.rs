//! Typed conversions routed through JSON

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{instrument, trace};

use super::mapping_to_json_value;
use crate::bean::PropertyMapper;
use crate::error::Result;
use crate::types::{Mapping, Record, Value};

/// Converts between mappings and serde types by way of `serde_json::Value`
#[derive(Clone, Default)]
pub struct JsonBean {
    mapper: PropertyMapper,
}

impl JsonBean {
    pub fn new(mapper: PropertyMapper) -> Self {
        Self { mapper }
    }

    /// Builds a `T` from `mapping`, letting serde handle dates and nesting
    #[instrument(skip_all, fields(target = std::any::type_name::<T>()))]
    pub fn mapping_to_type<T: DeserializeOwned>(&self, mapping: &Mapping) -> Result<T> {
        let value = serde_json::from_value(mapping_to_json_value(mapping))?;
        trace!("Mapping deserialized");
        Ok(value)
    }

    /// Serializes `source` and reads it back as a mapping
    pub fn type_to_mapping<S: Serialize + ?Sized>(&self, source: &S) -> Result<Mapping> {
        match Value::from_json(serde_json::to_value(source)?) {
            Value::Map(map) => Ok(map),
            other => Err(crate::error::Error::invalid_argument(format!(
                "{} does not serialize to an object",
                other.kind()
            ))),
        }
    }

    /// Any serde type into any other with the same JSON shape
    pub fn convert<S, T>(&self, source: &S) -> Result<T>
    where
        S: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(serde_json::to_value(source)?)?)
    }

    /// Deserializes a fresh `T` from `mapping` and copies its fields into
    /// `target`. Fields the mapping does not name take `T`'s serde defaults.
    pub fn copy_via_json<T>(&self, mapping: &Mapping, target: &mut T) -> Result<()>
    where
        T: Record + DeserializeOwned,
    {
        let fresh: T = self.mapping_to_type(mapping)?;
        self.mapper.record_to_record(&fresh, target)
    }
}
