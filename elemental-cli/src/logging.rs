//! Logging setup for the command line client
//!
//! Library crates only emit `tracing` events. This module installs the
//! subscriber that decides whether and how they are printed.

use clap::ValueEnum;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Environment variable overriding the log filter
pub const ENV_LOG_LEVEL: &str = "ELEMENTAL_LOG_LEVEL";

/// How log output is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoggingMode {
    /// No subscriber, every event is dropped
    Silent,
    /// Compact stderr output
    Development,
    /// Pretty output with thread ids and source locations
    Debug,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter { filter: String, reason: String },
}

/// Install the global subscriber for `mode`
///
/// `default_level` applies when neither `ELEMENTAL_LOG_LEVEL` nor
/// `RUST_LOG` is set. Logs go to stderr so stdout stays clean for
/// command output.
pub fn init_logging(mode: LoggingMode, default_level: &str) -> Result<(), LoggingError> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    match mode {
        LoggingMode::Silent => Ok(()),
        LoggingMode::Development => {
            let filter = create_env_filter(default_level)?;

            Registry::default()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .compact(),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
        LoggingMode::Debug => {
            let filter = create_env_filter(default_level)?;

            Registry::default()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .pretty()
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .with(filter)
                .try_init()
                .map_err(|e| LoggingError::TracingInit(e.to_string()))
        }
    }
}

/// Pick the filter directive: `ELEMENTAL_LOG_LEVEL`, then `RUST_LOG`, then the default
fn filter_directive(
    elemental_log_level: Option<String>,
    rust_log: Option<String>,
    default_level: &str,
) -> String {
    elemental_log_level
        .or(rust_log)
        .unwrap_or_else(|| default_level.to_string())
}

fn create_env_filter(default_level: &str) -> Result<EnvFilter, LoggingError> {
    let directive = filter_directive(
        std::env::var(ENV_LOG_LEVEL).ok(),
        std::env::var("RUST_LOG").ok(),
        default_level,
    );

    EnvFilter::try_new(&directive).map_err(|e| LoggingError::InvalidFilter {
        filter: directive,
        reason: e.to_string(),
    })
}
