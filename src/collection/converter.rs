//! Batch conversion of record and mapping sequences

use std::convert::Infallible;
use std::error::Error as StdError;

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::bean::{AsProps, Props, PropertyMapper, PropsMut};
use crate::error::{Error, Result};
use crate::types::{Mapping, Record};

/// Applies a [`PropertyMapper`] across sequences.
///
/// `ordered = true` converts sequentially and preserves input order.
/// `ordered = false` fans elements out over the worker pool and makes no
/// ordering promise. Either way the first failing element aborts the batch.
#[derive(Clone, Default)]
pub struct BatchConverter {
    mapper: PropertyMapper,
}

impl BatchConverter {
    pub fn new(mapper: PropertyMapper) -> Self {
        Self { mapper }
    }

    pub fn mapper(&self) -> &PropertyMapper {
        &self.mapper
    }

    /// Converts each source into a target built by `factory`
    #[instrument(skip_all, fields(count = sources.len(), ordered = ordered))]
    pub fn convert_all_with<S, T, F, E>(&self, sources: &[S], factory: F, ordered: bool) -> Result<Vec<T>>
    where
        S: AsProps + Sync,
        T: Record + Send,
        F: Fn() -> std::result::Result<T, E> + Send + Sync,
        E: StdError + Send + Sync + 'static,
    {
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let convert = |source: &S| -> Result<T> {
            let mut target = factory().map_err(Error::instantiation)?;
            self.mapper
                .copy(source.as_props(), PropsMut::Record(&mut target))?;
            Ok(target)
        };

        let converted: Vec<T> = if ordered {
            sources.iter().map(convert).collect::<Result<Vec<T>>>()?
        } else {
            self.mapper
                .run(|| sources.par_iter().map(convert).collect::<Result<Vec<T>>>())??
        };
        debug!(converted = converted.len(), "Batch conversion finished");
        Ok(converted)
    }

    /// Converts each source into a default-constructed `T`
    pub fn convert_all<S, T>(&self, sources: &[S], ordered: bool) -> Result<Vec<T>>
    where
        S: AsProps + Sync,
        T: Record + Default + Send,
    {
        self.convert_all_with(sources, || Ok::<T, Infallible>(T::default()), ordered)
    }

    /// Converts each source into a fresh mapping. Mapping elements are cloned
    /// as they are.
    #[instrument(skip_all, fields(count = sources.len(), ordered = ordered))]
    pub fn convert_all_to_mapping<S>(&self, sources: &[S], ordered: bool) -> Result<Vec<Mapping>>
    where
        S: AsProps + Sync,
    {
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        let convert = |source: &S| -> Result<Mapping> {
            match source.as_props() {
                Props::Record(record) => self.mapper.to_mapping(record),
                Props::Mapping(map) => Ok(map.clone()),
            }
        };

        if ordered {
            sources.iter().map(convert).collect()
        } else {
            self.mapper
                .run(|| sources.par_iter().map(convert).collect::<Result<Vec<Mapping>>>())?
        }
    }
}
