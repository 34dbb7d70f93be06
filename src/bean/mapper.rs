//! Property copying between records and mappings

use std::collections::HashMap;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, instrument, trace};

use super::introspector::{readable_fields, writable_fields};
use super::{AsProps, Props, PropsMut};
use crate::config::MapperConfig;
use crate::error::{Error, Result};
use crate::thread::WorkerPool;
use crate::types::{FieldDescriptor, Mapping, Record, Value};

/// Copies named, same-typed field values from a source to a target
#[derive(Clone, Default)]
pub struct PropertyMapper {
    config: MapperConfig,
    pool: Option<Arc<WorkerPool>>,
}

impl PropertyMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MapperConfig) -> Self {
        Self { config, pool: None }
    }

    /// Runs every parallel path of this mapper inside `pool`
    pub fn with_pool(mut self, pool: Arc<WorkerPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    pub fn pool(&self) -> Option<&Arc<WorkerPool>> {
        self.pool.as_ref()
    }

    /// Executes `op` on the configured pool, or on the caller's thread
    /// (rayon's default pool) when none is set
    pub(crate) fn run<OP, R>(&self, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => Ok(op()),
        }
    }

    /// Copies every readable field of `source` into `target`.
    ///
    /// Existing keys of `target` are kept unless the source has a field of the
    /// same name.
    #[instrument(skip_all)]
    pub fn record_to_mapping(&self, source: &dyn Record, target: &mut Mapping) -> Result<()> {
        let descriptors = source.descriptors();
        let readable = readable_fields(&descriptors);
        if readable.is_empty() {
            return Ok(());
        }

        let values = self.read_all(source, &readable)?;
        trace!(fields = values.len(), "Copied record into mapping");
        target.extend(values);
        Ok(())
    }

    /// Writes every mapping entry whose key names a writable field of
    /// `target`. Keys absent from `source` leave the field untouched.
    #[instrument(skip_all)]
    pub fn mapping_to_record(&self, source: &Mapping, target: &mut dyn Record) -> Result<()> {
        if source.is_empty() {
            return Ok(());
        }

        let descriptors = target.descriptors();
        let writable = writable_fields(&descriptors);
        if writable.is_empty() {
            return Ok(());
        }

        let mut written = 0usize;
        for field in writable {
            if let Some(value) = source.get(&field.name) {
                target
                    .write(&field.name, value.clone())
                    .map_err(|e| Error::property_copy(&field.name, e))?;
                written += 1;
            }
        }
        trace!(fields = written, "Copied mapping into record");
        Ok(())
    }

    /// Copies fields present on both sides with identical declared types
    #[instrument(skip_all)]
    pub fn record_to_record(&self, source: &dyn Record, target: &mut dyn Record) -> Result<()> {
        let source_descriptors = source.descriptors();
        let target_descriptors = target.descriptors();
        if source_descriptors.is_empty() || target_descriptors.is_empty() {
            return Ok(());
        }

        let by_name: HashMap<&str, &FieldDescriptor> = readable_fields(&source_descriptors)
            .into_iter()
            .map(|d| (d.name.as_str(), d))
            .collect();

        let plan: Vec<&FieldDescriptor> = writable_fields(&target_descriptors)
            .into_iter()
            .filter(|target_field| match by_name.get(target_field.name.as_str()) {
                None => false,
                Some(source_field) if source_field.ty != target_field.ty => {
                    debug!(
                        field = %target_field.name,
                        source_type = source_field.ty.name(),
                        target_type = target_field.ty.name(),
                        "Skipping field with mismatched declared type"
                    );
                    false
                }
                Some(_) => true,
            })
            .collect();

        let values = self.read_all(source, &plan)?;
        for (name, value) in values {
            target
                .write(&name, value)
                .map_err(|e| Error::property_copy(&name, e))?;
        }
        Ok(())
    }

    /// Dispatches on the shape of both sides
    pub fn copy(&self, source: Props<'_>, target: PropsMut<'_>) -> Result<()> {
        match (source, target) {
            (Props::Mapping(_), PropsMut::Mapping(_)) => Err(Error::UnsupportedOperation(
                "mapping to mapping property copy".into(),
            )),
            (Props::Mapping(source), PropsMut::Record(target)) => self.mapping_to_record(source, target),
            (Props::Record(source), PropsMut::Mapping(target)) => self.record_to_mapping(source, target),
            (Props::Record(source), PropsMut::Record(target)) => self.record_to_record(source, target),
        }
    }

    /// Fresh mapping holding every readable field of `source`
    pub fn to_mapping(&self, source: &dyn Record) -> Result<Mapping> {
        let mut target = Mapping::new();
        self.record_to_mapping(source, &mut target)?;
        Ok(target)
    }

    /// Copies `source` into a default-constructed `T`
    pub fn copy_new<T, S>(&self, source: &S) -> Result<T>
    where
        T: Record + Default,
        S: AsProps + ?Sized,
    {
        let mut target = T::default();
        self.copy(source.as_props(), PropsMut::Record(&mut target))?;
        Ok(target)
    }

    fn read_all(&self, source: &dyn Record, fields: &[&FieldDescriptor]) -> Result<Vec<(String, Value)>> {
        let read = |field: &&FieldDescriptor| {
            source
                .read(&field.name)
                .map(|value| (field.name.clone(), value))
                .map_err(|e| Error::property_copy(&field.name, e))
        };

        if fields.len() > self.config.parallel_field_threshold {
            self.run(|| fields.par_iter().map(read).collect::<Result<Vec<_>>>())?
        } else {
            fields.iter().map(read).collect()
        }
    }
}
