//! Host configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate and checked with `validator` before use. Each sub-module
//! represents a logical configuration section.

pub mod http;
pub mod logging;
pub mod plugin;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::http::HttpConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::plugin::PluginConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SEATWATCH";

/// Root host configuration.
///
/// Top-level deserialization target for the merged TOML configuration
/// files (`default.toml` + environment overlay) and `SEATWATCH__*`
/// environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
    /// Outbound HTTP client settings.
    #[serde(default)]
    #[validate(nested)]
    pub http: HttpConfig,
    /// Plugin host settings.
    #[serde(default)]
    #[validate(nested)]
    pub plugins: PluginConfig,
}

impl AppConfig {
    /// Load configuration from the `config/` directory of the working directory.
    pub fn load(env: &str) -> AppResult<Self> {
        Self::load_from(Path::new("config"), env)
    }

    /// Load configuration from `dir`.
    ///
    /// Merges `dir/default.toml` with `dir/{env}.toml` and environment
    /// variables prefixed with `SEATWATCH__`. Both files are optional.
    pub fn load_from(dir: &Path, env: &str) -> AppResult<Self> {
        let default_path = dir.join("default");
        let env_path = dir.join(env);

        let config = config::Config::builder()
            .add_source(config::File::with_name(&default_path.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&env_path.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app_config.validate()?;
        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_from(dir.path(), "test").expect("load");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.plugins.hook_timeout_seconds, 30);
        assert!(config.http.timeout_seconds.is_none());
        assert!(config.plugins.settings.is_empty());
    }

    #[test]
    fn test_environment_overlay_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[logging]
level = "info"
format = "pretty"

[plugins]
hook_timeout_seconds = 45
"#,
        )
        .expect("write default");
        std::fs::write(
            dir.path().join("staging.toml"),
            r#"
[logging]
level = "debug"

[plugins.settings.license-alert]
license_usage_threshold = 90
notify_user = true
"#,
        )
        .expect("write overlay");

        let config = AppConfig::load_from(dir.path(), "staging").expect("load");

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.plugins.hook_timeout_seconds, 45);

        let overrides = config
            .plugins
            .settings
            .get("license-alert")
            .expect("plugin overrides");
        assert_eq!(
            overrides.get("license_usage_threshold"),
            Some(&serde_json::json!(90))
        );
        assert_eq!(overrides.get("notify_user"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn test_out_of_range_timeout_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("default.toml"),
            "[plugins]\nhook_timeout_seconds = 0\n",
        )
        .expect("write default");

        let err = AppConfig::load_from(dir.path(), "test").unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Validation);
    }
}
