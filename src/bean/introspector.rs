//! Per-type field metadata discovery and caching

use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use lazy_static::lazy_static;
use tracing::trace;

use crate::types::{Describe, FieldDescriptor, TYPE_METADATA_FIELD};

lazy_static! {
    static ref GLOBAL: Introspector = Introspector::new();
}

/// Caches descriptor tables keyed by record type
pub struct Introspector {
    cache: DashMap<TypeId, Arc<[FieldDescriptor]>>,
}

impl Introspector {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Process-wide cache used by [`impl_record!`](crate::impl_record) types
    pub fn global() -> &'static Introspector {
        &GLOBAL
    }

    /// Returns the descriptor table of `T`, describing it on first use
    pub fn descriptors_of<T: Describe + 'static>(&self) -> Arc<[FieldDescriptor]> {
        let key = TypeId::of::<T>();
        if let Some(cached) = self.cache.get(&key) {
            return cached.value().clone();
        }

        // Describe outside the shard lock: a derived type describes its base
        // through this same cache.
        let described: Arc<[FieldDescriptor]> = T::describe().into();
        trace!(
            record = std::any::type_name::<T>(),
            fields = described.len(),
            "Described record type"
        );
        self.cache.entry(key).or_insert(described).value().clone()
    }

    pub fn cached_types(&self) -> usize {
        self.cache.len()
    }

    pub fn clear(&self) {
        self.cache.clear();
    }
}

impl Default for Introspector {
    fn default() -> Self {
        Self::new()
    }
}

/// Readable fields, first occurrence of each name wins; the type-metadata
/// field is excluded
pub fn readable_fields(descriptors: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    let mut seen = HashSet::new();
    descriptors
        .iter()
        .filter(|d| seen.insert(d.name.as_str()))
        .filter(|d| d.readable && d.name != TYPE_METADATA_FIELD)
        .collect()
}

/// Writable fields, first occurrence of each name wins; the type-metadata
/// field is excluded
pub fn writable_fields(descriptors: &[FieldDescriptor]) -> Vec<&FieldDescriptor> {
    let mut seen = HashSet::new();
    descriptors
        .iter()
        .filter(|d| seen.insert(d.name.as_str()))
        .filter(|d| d.writable && d.name != TYPE_METADATA_FIELD)
        .collect()
}
