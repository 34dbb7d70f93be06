//! Water: property mapping between typed records and dynamic mappings
//!
//! Provides field-level copying between records and string-keyed mappings,
//! batch conversion of sequences, forest construction from parent-linked
//! items, a JSON bridge, and a small SQL helper layered on the same value
//! model.

// Core
pub mod config;
pub mod error;
pub mod types;

// Property mapping
pub mod bean;
pub mod collection;
pub mod tree;

// Bridges
pub mod json;
pub mod sql;

// Infrastructure
pub mod thread;
pub mod utils;

// Re-exports
pub use bean::{AsProps, Introspector, PropertyMapper, Props, PropsMut};
pub use collection::BatchConverter;
pub use config::WaterConfig;
pub use error::{Error, FieldError, Result, SqlError, ValueError};
pub use thread::{PoolBuilder, WorkerPool};
pub use tree::{TreeBuilder, TreeNode};
pub use types::{Describe, FieldDescriptor, FromValue, IntoValue, Mapping, Record, TypeTag, Value};
pub use utils::Logger;
