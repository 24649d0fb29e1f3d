//! Plugin host configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Plugin host configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PluginConfig {
    /// Upper bound on a single hook handler invocation, in seconds.
    #[serde(default = "default_hook_timeout")]
    #[validate(range(min = 1, max = 600))]
    pub hook_timeout_seconds: u64,
    /// Setting values per plugin ID, applied over each setting's package value
    /// when the plugin is loaded.
    #[serde(default)]
    pub settings: HashMap<String, HashMap<String, serde_json::Value>>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            hook_timeout_seconds: default_hook_timeout(),
            settings: HashMap::new(),
        }
    }
}

fn default_hook_timeout() -> u64 {
    30
}
