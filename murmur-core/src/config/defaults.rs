//! Default values for Murmur core configuration.
//!
//! These functions back the `#[serde(default = "...")]` attributes on the
//! configuration structs and the `Default` implementations, keeping the two
//! in sync.

use super::types::{LoggingConfig, NotificationConfig};
use std::path::PathBuf;

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig::default()
}

/// Visible slots promoted by the queue processor. One slot serializes
/// presentation to a single notification at a time.
pub(crate) fn default_max_visible() -> usize {
    1
}

/// Duration applied to requests that do not set one, in milliseconds.
pub(crate) fn default_duration_ms() -> i64 {
    3000
}

/// Capacity of the lifecycle event broadcast channel.
pub(crate) fn default_event_capacity() -> usize {
    64
}

pub(crate) fn default_notification_config() -> NotificationConfig {
    NotificationConfig::default()
}
