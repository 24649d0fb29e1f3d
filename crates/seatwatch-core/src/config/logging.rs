//! Logging configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    Compact,
}

/// Logging and tracing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Log level or filter directive, e.g. `"info"` or `"plugin_license_alert=debug"`.
    #[serde(default = "default_level")]
    #[validate(length(min = 1))]
    pub level: String,
    /// Log format.
    #[serde(default = "default_format")]
    pub format: LogFormat,
    /// Whether to include the event target (module path).
    #[serde(default = "default_true")]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            with_target: default_true(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> LogFormat {
    LogFormat::Json
}

fn default_true() -> bool {
    true
}
