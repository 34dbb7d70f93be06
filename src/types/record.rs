//! Structured record capability and field metadata

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::value::Value;
use crate::error::FieldError;

/// Field name reserved for type metadata; never copied into mappings
pub const TYPE_METADATA_FIELD: &str = "class";

/// Identity of a field's declared Rust type.
///
/// Two tags compare equal only when they name the very same type, so an
/// `i32` field never matches an `i64` or an `Option<i32>` field.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Metadata describing one field of a record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeTag,
    pub readable: bool,
    pub writable: bool,
}

impl FieldDescriptor {
    /// Readable and writable field of type `T`
    pub fn new<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::with_access(name, TypeTag::of::<T>(), true, true)
    }

    pub fn with_access(name: impl Into<String>, ty: TypeTag, readable: bool, writable: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            readable,
            writable,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn write_only(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// A value exposing named, typed fields through read and write accessors.
///
/// Implement it by hand for dynamic types, or with [`impl_record!`](crate::impl_record)
/// for plain structs.
pub trait Record: Send + Sync {
    /// Field metadata for this record's type, in declaration order.
    ///
    /// A name may appear more than once when an embedded base record shadows
    /// it; the first occurrence is authoritative.
    fn descriptors(&self) -> Arc<[FieldDescriptor]>;

    fn read(&self, field: &str) -> Result<Value, FieldError>;

    fn write(&mut self, field: &str, value: Value) -> Result<(), FieldError>;
}

/// Static descriptor table of a record type, consumed by the introspector cache
pub trait Describe {
    fn describe() -> Vec<FieldDescriptor>;
}

/// Implements [`Describe`] and [`Record`] for a struct.
///
/// Fields are readable and writable unless marked `#[readonly]` or
/// `#[writeonly]`. `extends base: Base` forwards unknown names to an embedded
/// record whose descriptors follow the struct's own, so own fields shadow the
/// base's same-named ones.
///
/// ```ignore
/// impl_record!(User { name: String, age: i32, #[readonly] created: NaiveDateTime });
/// impl_record!(Admin { level: u8 } extends user: User);
/// ```
#[macro_export]
macro_rules! impl_record {
    (@readable) => { true };
    (@readable readonly) => { true };
    (@readable writeonly) => { false };
    (@writable) => { true };
    (@writable readonly) => { false };
    (@writable writeonly) => { true };

    (
        $name:ident {
            $( $(#[$mode:ident])? $field:ident : $fty:ty ),* $(,)?
        }
        $( extends $base:ident : $bty:ty )?
    ) => {
        impl $crate::types::Describe for $name {
            fn describe() -> ::std::vec::Vec<$crate::types::FieldDescriptor> {
                #[allow(unused_mut)]
                let mut fields = ::std::vec![
                    $(
                        $crate::types::FieldDescriptor::with_access(
                            stringify!($field),
                            $crate::types::TypeTag::of::<$fty>(),
                            $crate::impl_record!(@readable $($mode)?),
                            $crate::impl_record!(@writable $($mode)?),
                        ),
                    )*
                ];
                $(
                    fields.extend(
                        $crate::bean::Introspector::global()
                            .descriptors_of::<$bty>()
                            .iter()
                            .cloned(),
                    );
                )?
                fields
            }
        }

        impl $crate::types::Record for $name {
            fn descriptors(&self) -> ::std::sync::Arc<[$crate::types::FieldDescriptor]> {
                $crate::bean::Introspector::global().descriptors_of::<Self>()
            }

            #[allow(unreachable_code)]
            fn read(
                &self,
                field: &str,
            ) -> ::std::result::Result<$crate::types::Value, $crate::error::FieldError> {
                match field {
                    $(
                        stringify!($field) => {
                            if $crate::impl_record!(@readable $($mode)?) {
                                Ok($crate::types::IntoValue::into_value(
                                    ::std::clone::Clone::clone(&self.$field),
                                ))
                            } else {
                                Err($crate::error::FieldError::NotReadable(field.to_owned()))
                            }
                        }
                    )*
                    _ => {
                        $( return $crate::types::Record::read(&self.$base, field); )?
                        Err($crate::error::FieldError::UnknownField(field.to_owned()))
                    }
                }
            }

            #[allow(unreachable_code)]
            fn write(
                &mut self,
                field: &str,
                value: $crate::types::Value,
            ) -> ::std::result::Result<(), $crate::error::FieldError> {
                match field {
                    $(
                        stringify!($field) => {
                            if $crate::impl_record!(@writable $($mode)?) {
                                self.$field = $crate::types::FromValue::from_value(value).map_err(
                                    |source| $crate::error::FieldError::Conversion {
                                        field: field.to_owned(),
                                        source,
                                    },
                                )?;
                                Ok(())
                            } else {
                                Err($crate::error::FieldError::NotWritable(field.to_owned()))
                            }
                        }
                    )*
                    _ => {
                        $( return $crate::types::Record::write(&mut self.$base, field, value); )?
                        Err($crate::error::FieldError::UnknownField(field.to_owned()))
                    }
                }
            }
        }
    };
}
