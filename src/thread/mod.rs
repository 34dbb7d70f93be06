//! Worker pool construction and lifecycle

pub mod pool;

pub use pool::{PoolBuilder, WorkerPool, DEFAULT_THREAD_PREFIX};
