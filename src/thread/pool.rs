//! Caller-owned worker pool for data-parallel fan-out

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::config::PoolConfig;
use crate::error::{Error, Result};

/// Prefix used when none (or an empty one) is configured
pub const DEFAULT_THREAD_PREFIX: &str = "water";

/// Builder for [`WorkerPool`]
#[derive(Debug, Clone)]
pub struct PoolBuilder {
    threads: usize,
    thread_name_prefix: String,
    stack_size: Option<usize>,
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self::from_config(&PoolConfig::default())
    }

    pub fn from_config(config: &PoolConfig) -> Self {
        Self {
            threads: config.threads,
            thread_name_prefix: config.thread_name_prefix.clone(),
            stack_size: config.stack_size,
        }
    }

    /// Number of worker threads; 0 lets rayon pick one per CPU
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub fn build(self) -> Result<WorkerPool> {
        let prefix = if self.thread_name_prefix.trim().is_empty() {
            DEFAULT_THREAD_PREFIX.to_string()
        } else {
            self.thread_name_prefix
        };

        let name_prefix = prefix.clone();
        let mut builder = ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .thread_name(move |index| format!("{}-{}", name_prefix, index + 1));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }

        let pool = builder.build()?;
        info!(
            threads = pool.current_num_threads(),
            prefix = %prefix,
            "Worker pool started"
        );

        Ok(WorkerPool {
            inner: RwLock::new(Some(Arc::new(pool))),
            prefix,
            spawned: AtomicUsize::new(0),
        })
    }
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker pool with an explicit shutdown lifecycle.
///
/// Share it with `Arc`; once [`shutdown`](WorkerPool::shutdown) is called every
/// further submission fails with [`Error::ThreadError`].
pub struct WorkerPool {
    inner: RwLock<Option<Arc<ThreadPool>>>,
    prefix: String,
    spawned: AtomicUsize,
}

impl WorkerPool {
    pub fn builder() -> PoolBuilder {
        PoolBuilder::new()
    }

    fn handle(&self) -> Result<Arc<ThreadPool>> {
        self.inner
            .read()
            .clone()
            .ok_or_else(|| Error::ThreadError(format!("worker pool `{}` is shut down", self.prefix)))
    }

    /// Runs `op` inside the pool; rayon work started by `op` stays in the pool
    pub fn install<OP, R>(&self, op: OP) -> Result<R>
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        let pool = self.handle()?;
        Ok(pool.install(op))
    }

    /// Fire-and-forget job
    pub fn spawn<F>(&self, job: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let pool = self.handle()?;
        self.spawned.fetch_add(1, Ordering::Relaxed);
        pool.spawn(job);
        Ok(())
    }

    pub fn current_num_threads(&self) -> usize {
        self.inner
            .read()
            .as_ref()
            .map_or(0, |pool| pool.current_num_threads())
    }

    pub fn thread_name_prefix(&self) -> &str {
        &self.prefix
    }

    pub fn spawned_jobs(&self) -> usize {
        self.spawned.load(Ordering::Relaxed)
    }

    pub fn is_shutdown(&self) -> bool {
        self.inner.read().is_none()
    }

    /// Stops accepting work. Worker threads exit once queued jobs finish and
    /// the last in-flight `install` returns.
    pub fn shutdown(&self) {
        match self.inner.write().take() {
            Some(_) => debug!(prefix = %self.prefix, "Worker pool shut down"),
            None => warn!(prefix = %self.prefix, "Worker pool already shut down"),
        }
    }
}
