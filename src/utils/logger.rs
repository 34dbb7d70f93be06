//! Logger setup for the water library

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Installs a `tracing` subscriber for the process
pub struct Logger {
    level: String,
    initialized: bool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            level: "info".to_string(),
            initialized: false,
        }
    }

    pub fn with_level(level: &str) -> Self {
        Self {
            level: level.to_string(),
            initialized: false,
        }
    }

    pub fn from_config(config: &LogConfig) -> Self {
        Self::with_level(&config.level)
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    /// `RUST_LOG` wins over the configured level. Returns false when another
    /// subscriber was already installed.
    pub fn init(&mut self) -> bool {
        if self.initialized {
            return true;
        }

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.level));

        match tracing_subscriber::fmt().with_env_filter(filter).try_init() {
            Ok(()) => {
                self.initialized = true;
                info!("Logger initialized with level: {}", self.level);
                true
            }
            Err(_) => {
                debug!("Global subscriber already set; keeping it");
                false
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
