//! Utility Module Implementation
//!
//! Aggregates internal helpers: logging setup, naming conversions and the
//! shared configuration trait.

use crate::error::Result;

// Submodules
pub mod logger;
pub mod text;

// Re-exports for unified access
pub use self::{logger::*, text::*};

// General trait for configurable utility components
pub trait UtilityConfig: Send + Sync {
    fn validate(&self) -> Result<()>;
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}
