//! Error types and handling for the water library

use std::{
    error::Error as StdError,
    io,
    result::Result as StdResult,
};

use thiserror::Error;

/// Custom result type for water operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for water operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Property copy error on field `{field}`: {source}")]
    PropertyCopy {
        field: String,
        #[source]
        source: FieldError,
    },

    #[error("Instantiation error: {0}")]
    InstantiationError(#[source] Box<dyn StdError + Send + Sync>),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Tree error: {0}")]
    TreeError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("SQL error: {0}")]
    SqlError(#[from] SqlError),

    #[error("Thread pool error: {0}")]
    ThreadError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Wraps a field failure with the name of the field being copied
    pub fn property_copy(field: impl Into<String>, source: FieldError) -> Self {
        Error::PropertyCopy {
            field: field.into(),
            source,
        }
    }

    /// Wraps a constructor failure raised while building a batch target
    pub fn instantiation<E: StdError + Send + Sync + 'static>(e: E) -> Self {
        Error::InstantiationError(Box::new(e))
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::SqlError(SqlError::Driver(err))
    }
}

impl From<rayon::ThreadPoolBuildError> for Error {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Error::ThreadError(err.to_string())
    }
}

// -------------------- Sub-Error Categories --------------------

/// Failure reading or writing a single record field
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FieldError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{0}` is not readable")]
    NotReadable(String),

    #[error("field `{0}` is not writable")]
    NotWritable(String),

    #[error("cannot convert value for field `{field}`: {source}")]
    Conversion {
        field: String,
        #[source]
        source: ValueError,
    },

    #[error("{0}")]
    Custom(String),
}

/// Failure converting a dynamic `Value` into a concrete Rust type
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value {value} out of range for {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error("invalid {target} literal: {value}")]
    Parse { value: String, target: &'static str },
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SqlError {
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Parameter count mismatch: {markers} placeholders, {values} values")]
    ParameterCount { markers: usize, values: usize },

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Driver error: {0}")]
    Driver(#[source] rusqlite::Error),
}
