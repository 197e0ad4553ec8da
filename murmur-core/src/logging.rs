//! Logging setup for Murmur.
//!
//! Built on the `tracing` ecosystem: a console layer (text or JSON) and an
//! optional non-blocking file layer with daily rotation. Configuration comes
//! from [`LoggingConfig`].

use crate::config::LoggingConfig;
use crate::error::CoreError;
use crate::utils::fs::ensure_dir_exists;

use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Holds the worker guard of the file logger for the lifetime of the
/// process, so buffered log lines are flushed on shutdown.
static LOG_WORKER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup directed at `stderr`.
///
/// Intended for tests and for early startup before configuration is loaded.
/// The filter comes from `RUST_LOG`, defaulting to `info`. Errors (such as a
/// logger already being installed) are ignored, so this is safe to call
/// repeatedly.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Creates the file logging layer and its worker guard.
///
/// Ensures the log file's parent directory exists and sets up a daily
/// rolling, non-blocking appender.
fn create_file_layer(
    log_path: &Path,
    format: &str,
) -> Result<(Box<dyn Layer<Registry> + Send + Sync + 'static>, WorkerGuard), CoreError> {
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            ensure_dir_exists(parent)?;
        }
    }

    let file_appender = tracing_appender::rolling::daily(
        log_path.parent().unwrap_or_else(|| Path::new(".")),
        log_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("murmur.log")),
    );
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    match format {
        "json" => {
            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_writer)
                .with_ansi(false);
            Ok((Box::new(layer), guard))
        }
        _ => {
            let layer = fmt::layer().with_writer(non_blocking_writer).with_ansi(false);
            Ok((Box::new(layer), guard))
        }
    }
}

/// Initializes the global logging system from a [`LoggingConfig`].
///
/// Installs a console layer and, when `config.file_path` is set, a file
/// layer. With `is_reload` set, an already-installed subscriber is not an
/// error; the previous subscriber stays active.
///
/// # Errors
///
/// Returns [`CoreError::LoggingInitialization`] on an invalid log level or
/// when the global subscriber cannot be installed on initial setup.
pub fn init_logging(config: &LoggingConfig, is_reload: bool) -> Result<(), CoreError> {
    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        invalid => {
            return Err(CoreError::LoggingInitialization(format!(
                "invalid log level in config: {}",
                invalid
            )))
        }
    };
    let level_str = level.to_string();

    let stdout_layer = match config.format.to_lowercase().as_str() {
        "json" => fmt::layer()
            .json()
            .with_writer(stdout)
            .with_ansi(false)
            .with_filter(EnvFilter::new(level_str.clone()))
            .boxed(),
        _ => fmt::layer()
            .with_writer(stdout)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .with_filter(EnvFilter::new(level_str.clone()))
            .boxed(),
    };

    let mut new_file_guard: Option<WorkerGuard> = None;
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>> = vec![stdout_layer];
    if let Some(log_path) = &config.file_path {
        let (file_layer, guard) = create_file_layer(log_path, &config.format.to_lowercase())?;
        new_file_guard = Some(guard);
        layers.push(file_layer.with_filter(EnvFilter::new(level_str)).boxed());
    }

    let result = Registry::default().with(layers).try_init();

    if let Ok(mut guard_slot) = LOG_WORKER_GUARD.lock() {
        *guard_slot = new_file_guard;
    }

    match result {
        Ok(()) => Ok(()),
        Err(err) if is_reload => {
            tracing::info!(
                "Logging re-initialization attempted; previous subscriber persists: {}",
                err
            );
            Ok(())
        }
        Err(err) => Err(CoreError::LoggingInitialization(format!(
            "failed to set global tracing subscriber: {}",
            err
        ))),
    }
}
