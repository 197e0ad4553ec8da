//! # Murmur Core Library (`murmur-core`)
//!
//! `murmur-core` is the infrastructure layer of the Murmur notification
//! engine. It provides the services every other crate in the workspace
//! builds on:
//!
//! - **Error Handling**: a unified error system through [`CoreError`] and
//!   the more specific [`ConfigError`].
//! - **Configuration Management**: TOML-based configuration loading with
//!   default fallbacks and validation, through [`ConfigLoader`] and
//!   [`CoreConfig`].
//! - **Logging**: a `tracing`-based logging framework configurable for
//!   console and file output in text or JSON format.
//!
//! ```rust,ignore
//! use murmur_core::config::ConfigLoader;
//! use murmur_core::logging::init_logging;
//!
//! let config = ConfigLoader::load()?;
//! init_logging(&config.logging, false)?;
//! tracing::info!("murmur core initialized");
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig, NotificationConfig};
pub use error::{ConfigError, CoreError};
pub use logging::{init_logging, init_minimal_logging};
