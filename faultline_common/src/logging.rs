//! Tracing subscriber setup.
//!
//! Library code only emits `tracing` events. Binaries and demos call
//! [`init_logging`] once with their [`SharedConfig`].

use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{LogLevel, SharedConfig};

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

/// Build the env filter: `RUST_LOG` first, then the configured level.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::from_default_env().add_directive(Level::from(level).into())
}

/// Install the global tracing subscriber.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(shared: &SharedConfig) -> bool {
    let filter = env_filter(shared.log_level);

    let installed = if shared.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };
    installed.is_ok()
}
