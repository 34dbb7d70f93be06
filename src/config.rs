//! Configuration types and validation for the mapper, worker pool and logging

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::UtilityConfig;

/// Environment variables consulted by [`WaterConfig::apply_env`]
pub const ENV_POOL_THREADS: &str = "WATER_POOL_THREADS";
pub const ENV_LOG_LEVEL: &str = "WATER_LOG_LEVEL";
pub const ENV_PARALLEL_THRESHOLD: &str = "WATER_PARALLEL_THRESHOLD";

/// Property mapper tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Field sets larger than this are read in parallel
    pub parallel_field_threshold: usize,
}

/// Worker pool construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub threads: usize,
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

/// Top-level library configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub mapper: MapperConfig,
    pub pool: PoolConfig,
    pub logging: LogConfig,
}

// Defaults
impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            parallel_field_threshold: 32,
        }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            threads: num_cpus::get(),
            thread_name_prefix: crate::thread::DEFAULT_THREAD_PREFIX.to_string(),
            stack_size: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl WaterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WaterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Overrides settings from `WATER_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        let overrides = [
            (ENV_POOL_THREADS, "pool.threads"),
            (ENV_LOG_LEVEL, "logging.level"),
            (ENV_PARALLEL_THRESHOLD, "mapper.parallel_field_threshold"),
        ];
        for (var, key) in overrides {
            if let Ok(value) = std::env::var(var) {
                debug!("Applying {} from environment", key);
                self.set(key, value)?;
            }
        }
        self.validate()
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::ConfigError(format!("Invalid value for {}: {}", key, value)))
}

impl UtilityConfig for WaterConfig {
    fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(Error::ConfigError(format!(
                "Unknown log level: {}",
                self.logging.level
            )));
        }
        if let Some(stack) = self.pool.stack_size {
            if stack < 64 * 1024 {
                return Err(Error::ConfigError("Stack size too small".into()));
            }
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Option<String> {
        match key {
            "mapper.parallel_field_threshold" => Some(self.mapper.parallel_field_threshold.to_string()),
            "pool.threads" => Some(self.pool.threads.to_string()),
            "pool.thread_name_prefix" => Some(self.pool.thread_name_prefix.clone()),
            "pool.stack_size" => self.pool.stack_size.map(|v| v.to_string()),
            "logging.level" => Some(self.logging.level.clone()),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "mapper.parallel_field_threshold" => self.mapper.parallel_field_threshold = parse(key, &value)?,
            "pool.threads" => self.pool.threads = parse(key, &value)?,
            "pool.thread_name_prefix" => self.pool.thread_name_prefix = value,
            "pool.stack_size" => self.pool.stack_size = Some(parse(key, &value)?),
            "logging.level" => self.logging.level = value,
            _ => return Err(Error::ConfigError(format!("Unknown key: {}", key))),
        }
        Ok(())
    }
}
