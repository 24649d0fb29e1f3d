//! Plugin settings: descriptors provided by plugins and the store that
//! serves their values back.
//!
//! A plugin declares its settings once, at load time. The host writes values
//! into the store (from configuration or an admin surface) and plugins read
//! them by ID through [`ScopedSettings`]. A setting with no stored value
//! reads as its package value.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

use seatwatch_core::error::AppError;
use seatwatch_core::result::AppResult;

use super::context::PluginSettingsService;

/// Kind of value a setting holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    /// Free text.
    String,
    /// Secret text, never shown back to non-admins.
    Password,
    /// Numeric value.
    Number,
    /// On/off toggle.
    Boolean,
    /// Reference to one or more rooms, picked from the workspace.
    RoomPick,
}

/// Declaration of a single plugin setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Unique key within the plugin.
    pub id: String,
    /// Value kind.
    pub kind: SettingKind,
    /// Default value.
    pub package_value: Value,
    /// Whether the host should insist on a value.
    pub required: bool,
    /// Whether non-admins may read the value.
    pub public: bool,
    /// Short label.
    pub i18n_label: String,
    /// Longer description.
    pub i18n_description: String,
}

impl SettingDescriptor {
    /// Starts a descriptor with a `null` package value, optional and public.
    pub fn new(id: &str, kind: SettingKind) -> Self {
        Self {
            id: id.to_string(),
            kind,
            package_value: Value::Null,
            required: false,
            public: true,
            i18n_label: String::new(),
            i18n_description: String::new(),
        }
    }

    /// Sets the package (default) value.
    pub fn package_value(mut self, value: Value) -> Self {
        self.package_value = value;
        self
    }

    /// Sets the required flag.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the public flag.
    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Sets the label.
    pub fn label(mut self, label: &str) -> Self {
        self.i18n_label = label.to_string();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: &str) -> Self {
        self.i18n_description = description.to_string();
        self
    }
}

#[derive(Debug, Default)]
struct PluginSettings {
    descriptors: Vec<SettingDescriptor>,
    values: HashMap<String, Value>,
}

impl PluginSettings {
    fn descriptor(&self, setting_id: &str) -> Option<&SettingDescriptor> {
        self.descriptors.iter().find(|d| d.id == setting_id)
    }

    fn value(&self, setting_id: &str) -> Option<Value> {
        let descriptor = self.descriptor(setting_id)?;
        Some(
            self.values
                .get(setting_id)
                .cloned()
                .unwrap_or_else(|| descriptor.package_value.clone()),
        )
    }
}

/// Host-side store of every loaded plugin's settings.
#[derive(Debug, Default)]
pub struct SettingsStore {
    /// Plugin ID → settings.
    plugins: RwLock<HashMap<String, PluginSettings>>,
}

impl SettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the settings a plugin provides.
    ///
    /// Fails if the plugin already provided settings or two descriptors share an ID.
    pub async fn provide(
        &self,
        plugin_id: &str,
        descriptors: Vec<SettingDescriptor>,
    ) -> AppResult<()> {
        let mut seen = std::collections::HashSet::new();
        for descriptor in &descriptors {
            if !seen.insert(descriptor.id.as_str()) {
                return Err(AppError::plugin(format!(
                    "Plugin '{}' declares setting '{}' more than once",
                    plugin_id, descriptor.id
                )));
            }
        }

        let mut plugins = self.plugins.write().await;
        if plugins.contains_key(plugin_id) {
            return Err(AppError::conflict(format!(
                "Settings for plugin '{}' are already provided",
                plugin_id
            )));
        }

        info!(
            plugin_id = %plugin_id,
            count = descriptors.len(),
            "Plugin settings provided"
        );

        plugins.insert(
            plugin_id.to_string(),
            PluginSettings {
                descriptors,
                values: HashMap::new(),
            },
        );
        Ok(())
    }

    /// Stores a value for a declared setting.
    pub async fn set_value(
        &self,
        plugin_id: &str,
        setting_id: &str,
        value: Value,
    ) -> AppResult<()> {
        let mut plugins = self.plugins.write().await;
        let settings = plugins.get_mut(plugin_id).ok_or_else(|| {
            AppError::not_found(format!("No settings provided by plugin '{}'", plugin_id))
        })?;

        if settings.descriptor(setting_id).is_none() {
            return Err(AppError::not_found(format!(
                "Plugin '{}' has no setting '{}'",
                plugin_id, setting_id
            )));
        }

        debug!(plugin_id = %plugin_id, setting_id = %setting_id, "Setting value updated");
        settings.values.insert(setting_id.to_string(), value);
        Ok(())
    }

    /// Current value of a setting, or its package value when unset.
    ///
    /// `None` when the plugin or setting is unknown.
    pub async fn value(&self, plugin_id: &str, setting_id: &str) -> Option<Value> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id)?.value(setting_id)
    }

    /// Descriptors provided by a plugin, in declaration order.
    pub async fn descriptors(&self, plugin_id: &str) -> Vec<SettingDescriptor> {
        let plugins = self.plugins.read().await;
        plugins
            .get(plugin_id)
            .map(|s| s.descriptors.clone())
            .unwrap_or_default()
    }

    /// IDs of required settings whose current value is null or an empty string.
    pub async fn missing_required(&self, plugin_id: &str) -> Vec<String> {
        let plugins = self.plugins.read().await;
        let Some(settings) = plugins.get(plugin_id) else {
            return Vec::new();
        };

        settings
            .descriptors
            .iter()
            .filter(|d| d.required)
            .filter(|d| match settings.value(&d.id) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            })
            .map(|d| d.id.clone())
            .collect()
    }

    /// Drops everything a plugin provided.
    pub async fn remove(&self, plugin_id: &str) {
        let mut plugins = self.plugins.write().await;
        plugins.remove(plugin_id);
    }

    /// Returns a reader bound to one plugin.
    pub fn scoped(self: &Arc<Self>, plugin_id: &str) -> ScopedSettings {
        ScopedSettings {
            store: Arc::clone(self),
            plugin_id: plugin_id.to_string(),
        }
    }
}

/// Settings reader for a single plugin, backed by the shared [`SettingsStore`].
#[derive(Debug, Clone)]
pub struct ScopedSettings {
    store: Arc<SettingsStore>,
    plugin_id: String,
}

#[async_trait]
impl PluginSettingsService for ScopedSettings {
    async fn value_by_id(&self, id: &str) -> Option<Value> {
        self.store.value(&self.plugin_id, id).await
    }
}
