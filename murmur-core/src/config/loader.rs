//! Configuration loading for Murmur.
//!
//! [`ConfigLoader`] locates the `config.toml` for the application, parses it
//! into a [`CoreConfig`], and validates the result. A missing configuration
//! file is not an error: defaults are used instead, so a host application
//! can run unconfigured.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories_next::ProjectDirs;
use tracing::debug;

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};

const CONFIG_FILE_NAME: &str = "config.toml";

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: &[&str] = &["text", "json"];

/// Namespace for configuration loading logic.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from the application's config
    /// directory.
    ///
    /// Resolution order:
    /// 1. `$XDG_CONFIG_HOME/murmur/config.toml` (via `directories-next`).
    /// 2. If the file does not exist, [`CoreConfig::default`] is used.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] when the config directory cannot be
    /// determined, the file exists but cannot be read or parsed, or
    /// validation fails.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let dirs = ProjectDirs::from("org", "murmur", "murmur").ok_or_else(|| {
            ConfigError::DirectoryUnavailable {
                dir_type: "project config directory".to_string(),
            }
        })?;
        let path = dirs.config_dir().join(CONFIG_FILE_NAME);

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loading configuration from {:?}", path);
                let mut config: CoreConfig =
                    toml::from_str(&content).map_err(ConfigError::ParseError)?;
                Self::validate_config(&mut config)?;
                Ok(config)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No configuration file at {:?}, using defaults", path);
                let mut config = CoreConfig::default();
                Self::validate_config(&mut config)?;
                Ok(config)
            }
            Err(err) => Err(ConfigError::ReadError { path, source: err }.into()),
        }
    }

    /// Loads and validates the configuration from an explicit path.
    ///
    /// Unlike [`ConfigLoader::load`], a missing file here is an error: the
    /// caller named the file, so its absence is reported as
    /// [`ConfigError::NotFound`].
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let content = fs::read_to_string(path).map_err(|err| {
            if err.kind() == ErrorKind::NotFound {
                ConfigError::NotFound {
                    locations: vec![PathBuf::from(path)],
                }
            } else {
                ConfigError::ReadError {
                    path: PathBuf::from(path),
                    source: err,
                }
            }
        })?;
        let mut config: CoreConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Normalizes and validates a configuration in place.
    ///
    /// Log level and format strings are lowercased; invalid values produce a
    /// [`ConfigError::ValidationError`].
    pub fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        config.logging.level = config.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "invalid log level '{}', expected one of {:?}",
                config.logging.level, VALID_LOG_LEVELS
            ))
            .into());
        }

        config.logging.format = config.logging.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "invalid log format '{}', expected one of {:?}",
                config.logging.format, VALID_LOG_FORMATS
            ))
            .into());
        }

        if config.notifications.max_visible == 0 {
            return Err(ConfigError::ValidationError(
                "notifications.max_visible must be at least 1".to_string(),
            )
            .into());
        }
        if config.notifications.default_duration_ms < 0 {
            return Err(ConfigError::ValidationError(format!(
                "notifications.default_duration_ms must not be negative, got {}",
                config.notifications.default_duration_ms
            ))
            .into());
        }
        if config.notifications.event_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "notifications.event_capacity must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_from_path_reads_and_validates() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
            [logging]
            level = "DEBUG"

            [notifications]
            max_visible = 2
            "#,
        );
        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.notifications.max_visible, 2);
    }

    #[test]
    fn load_from_path_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = ConfigLoader::load_from_path(&dir.path().join("absent.toml"));
        match result {
            Err(CoreError::Config(ConfigError::NotFound { locations })) => {
                assert_eq!(locations.len(), 1);
            }
            other => panic!("expected NotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn load_from_path_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "not = = toml");
        let result = ConfigLoader::load_from_path(&path);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ParseError(_)))
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = CoreConfig::default();
        config.logging.level = "supertrace".to_string();
        let result = ConfigLoader::validate_config(&mut config);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ValidationError(_)))
        ));
    }

    #[test]
    fn validate_rejects_zero_visible_slots() {
        let mut config = CoreConfig::default();
        config.notifications.max_visible = 0;
        let result = ConfigLoader::validate_config(&mut config);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ValidationError(_)))
        ));
    }

    #[test]
    fn validate_rejects_negative_default_duration() {
        let mut config = CoreConfig::default();
        config.notifications.default_duration_ms = -1;
        let result = ConfigLoader::validate_config(&mut config);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ValidationError(_)))
        ));
    }

    #[test]
    fn validate_normalizes_case() {
        let mut config = CoreConfig::default();
        config.logging.level = "WARN".to_string();
        config.logging.format = "Json".to_string();
        ConfigLoader::validate_config(&mut config).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "json");
    }
}
