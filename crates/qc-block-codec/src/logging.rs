//! Structured logging setup.
//!
//! The codec itself only emits `tracing` events; binaries and tests call
//! [`init_logging`] once to install a subscriber.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `config.log_level`. Returns `false` when a
/// global subscriber is already installed, which is not an error.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let result = if config.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };

    let installed = result.is_ok();
    if installed {
        tracing::debug!(
            log_level = %config.log_level,
            json_logs = config.json_logs,
            "Logging initialized"
        );
    }
    installed
}
