//! Configuration management for Murmur.
//!
//! TOML-based configuration with default fallbacks and validation. See
//! [`ConfigLoader`] for the loading entry points and [`CoreConfig`] for the
//! data model.

mod defaults;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, NotificationConfig};
