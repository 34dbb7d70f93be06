//! Bean-style property mapping
//!
//! Copies named field values between structured records and string-keyed
//! mappings. Record-to-record copies only transfer fields whose declared
//! types are identical.

pub mod introspector;
pub mod mapper;

pub use introspector::{readable_fields, writable_fields, Introspector};
pub use mapper::PropertyMapper;

use crate::types::{FieldDescriptor, Mapping, Record, Value};
use crate::error::FieldError;
use std::sync::Arc;

/// Read-only view of a copy source
#[derive(Clone, Copy)]
pub enum Props<'a> {
    Record(&'a dyn Record),
    Mapping(&'a Mapping),
}

/// Mutable view of a copy target
pub enum PropsMut<'a> {
    Record(&'a mut dyn Record),
    Mapping(&'a mut Mapping),
}

/// Anything that can act as a copy source
pub trait AsProps {
    fn as_props(&self) -> Props<'_>;
}

impl<R: Record> AsProps for R {
    fn as_props(&self) -> Props<'_> {
        Props::Record(self)
    }
}

impl AsProps for Mapping {
    fn as_props(&self) -> Props<'_> {
        Props::Mapping(self)
    }
}

impl AsProps for Props<'_> {
    fn as_props(&self) -> Props<'_> {
        *self
    }
}

impl<'a> From<&'a Mapping> for Props<'a> {
    fn from(map: &'a Mapping) -> Self {
        Props::Mapping(map)
    }
}

impl<'a> From<&'a mut Mapping> for PropsMut<'a> {
    fn from(map: &'a mut Mapping) -> Self {
        PropsMut::Mapping(map)
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn descriptors(&self) -> Arc<[FieldDescriptor]> {
        (**self).descriptors()
    }

    fn read(&self, field: &str) -> Result<Value, FieldError> {
        (**self).read(field)
    }

    fn write(&mut self, field: &str, value: Value) -> Result<(), FieldError> {
        (**self).write(field, value)
    }
}
