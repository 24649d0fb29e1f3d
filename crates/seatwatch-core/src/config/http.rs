//! Outbound HTTP client configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the HTTP client handed to plugins.
///
/// No timeout is applied unless one is configured; the hook dispatcher's
/// per-handler timeout bounds the whole invocation instead.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HttpConfig {
    /// `User-Agent` header sent with every request.
    #[serde(default = "default_user_agent")]
    #[validate(length(min = 1))]
    pub user_agent: String,
    /// Total request timeout in seconds.
    #[serde(default)]
    #[validate(range(min = 1, max = 600))]
    pub timeout_seconds: Option<u64>,
    /// Connect timeout in seconds.
    #[serde(default)]
    #[validate(range(min = 1, max = 120))]
    pub connect_timeout_seconds: Option<u64>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: None,
            connect_timeout_seconds: None,
        }
    }
}

fn default_user_agent() -> String {
    format!("seatwatch/{}", env!("CARGO_PKG_VERSION"))
}
