//! Configuration data structures for Murmur.
//!
//! These structs are populated by deserializing a TOML configuration file.
//! Missing fields fall back to the defaults in [`super::defaults`]; unknown
//! fields are rejected via `#[serde(deny_unknown_fields)]`.

use serde::Deserialize;
use std::path::PathBuf;

use super::defaults;

/// Configuration for the logging subsystem.
///
/// # Examples
///
/// ```
/// use murmur_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let default_log_config = LoggingConfig::default();
/// assert_eq!(default_log_config.level, "info");
/// assert_eq!(default_log_config.file_path, None);
/// assert_eq!(default_log_config.format, "text");
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/murmur.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/murmur.log")));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum log level to record. Valid values (case-insensitive):
    /// "trace", "debug", "info", "warn", "error".
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional path of a file to write logs to. `None` disables file
    /// logging.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// Format of log output: "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// Configuration for the notification queue engine.
///
/// Consumed by `murmur-domain` when constructing the engine.
///
/// # Examples
///
/// ```
/// use murmur_core::config::NotificationConfig;
///
/// let config = NotificationConfig::default();
/// assert_eq!(config.max_visible, 1);
/// assert_eq!(config.default_duration_ms, 3000);
///
/// let toml_str = r#"
/// max_visible = 3
/// default_duration_ms = 1500
/// "#;
/// let config: NotificationConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.max_visible, 3);
/// assert_eq!(config.default_duration_ms, 1500);
/// assert_eq!(config.event_capacity, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// Number of visible slots the queue processor may fill at once.
    /// The default of 1 serializes presentation to a single notification.
    #[serde(default = "defaults::default_max_visible")]
    pub max_visible: usize,
    /// Expiry duration, in milliseconds, applied to requests that do not
    /// carry their own. A request value of 0 persists until dismissed.
    #[serde(default = "defaults::default_duration_ms")]
    pub default_duration_ms: i64,
    /// Capacity of the lifecycle event broadcast channel.
    #[serde(default = "defaults::default_event_capacity")]
    pub event_capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_visible: defaults::default_max_visible(),
            default_duration_ms: defaults::default_duration_ms(),
            event_capacity: defaults::default_event_capacity(),
        }
    }
}

/// Root configuration structure for Murmur.
///
/// # Examples
///
/// ```
/// use murmur_core::config::CoreConfig;
///
/// let toml_str = r#"
/// [logging]
/// level = "warn"
///
/// [notifications]
/// max_visible = 2
/// "#;
/// let config: CoreConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.logging.level, "warn");
/// assert_eq!(config.notifications.max_visible, 2);
/// assert_eq!(config.notifications.default_duration_ms, 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Configuration for the logging subsystem.
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    /// Configuration for the notification queue engine.
    #[serde(default = "defaults::default_notification_config")]
    pub notifications: NotificationConfig,
}
