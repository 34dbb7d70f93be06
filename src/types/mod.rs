// Type definitions shared by the mapper, converters and SQL helpers

pub mod convert;
pub mod record;
pub mod value;

pub use convert::*;
pub use record::*;
pub use value::*;
