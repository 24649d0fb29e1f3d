//! Tracing subscriber initialization.

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::AppError;
use crate::result::AppResult;

/// Install the global tracing subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over `config.level` when set. Fails if a
/// global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> AppResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_thread_ids(true)
            .try_init(),
        LogFormat::Pretty => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init(),
        LogFormat::Compact => fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init(),
    };

    result.map_err(|e| AppError::configuration(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let config = LoggingConfig {
            format: LogFormat::Compact,
            ..Default::default()
        };

        // Other tests in this binary may have installed a subscriber already,
        // so only the second call is guaranteed to fail.
        let _ = init(&config);
        assert!(init(&config).is_err());
    }
}
