use water::config::{WaterConfig, ENV_LOG_LEVEL};
use water::utils::UtilityConfig;
use water::{Error, Logger, PoolBuilder};

use crate::write_temp_config;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_config_file_drives_pool() {
        let file = write_temp_config(r#"{"pool": {"threads": 2, "thread_name_prefix": "cfg"}, "logging": {"level": "debug"}}"#);
        let config = WaterConfig::from_file(file.path()).unwrap();
        assert_eq!(config.logging.level, "debug");

        let pool = PoolBuilder::from_config(&config.pool).build().unwrap();
        assert_eq!(pool.current_num_threads(), 2);
        assert_eq!(pool.thread_name_prefix(), "cfg");

        let mut logger = Logger::from_config(&config.logging);
        logger.init();
        assert_eq!(logger.level(), "debug");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = WaterConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_env_override() {
        std::env::set_var(ENV_LOG_LEVEL, "trace");
        let mut config = WaterConfig::default();
        config.apply_env().unwrap();
        std::env::remove_var(ENV_LOG_LEVEL);
        assert_eq!(config.get("logging.level").as_deref(), Some("trace"));
    }
}
