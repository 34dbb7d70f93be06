//! Sequence-level conversions built on the property mapper

pub mod converter;

pub use converter::BatchConverter;
