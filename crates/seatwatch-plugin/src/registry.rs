//! Plugin registry: the plugins currently loaded, each with the metadata it
//! reported when it was registered.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use seatwatch_core::error::AppError;
use seatwatch_core::result::AppResult;

use crate::api::settings::SettingDescriptor;
use crate::hooks::definitions::HookPoint;

/// Metadata about a loaded plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Hook points this plugin handles.
    pub hooks: Vec<String>,
    /// Whether the plugin is currently enabled.
    pub enabled: bool,
    /// Listing order (lower = listed first).
    pub priority: i32,
}

/// A compiled-in plugin.
///
/// Lifecycle callbacks default to no-ops; a plugin only overrides the ones it
/// has work for.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Returns the settings this plugin exposes to the host.
    ///
    /// Provided to the settings store once, when the plugin is loaded.
    fn settings(&self) -> Vec<SettingDescriptor> {
        Vec::new()
    }

    /// Returns the hook points this plugin handles.
    fn registered_hooks(&self) -> Vec<HookPoint>;

    /// Called once, before the plugin is registered.
    async fn on_load(&self) -> Result<(), String> {
        Ok(())
    }

    /// Called after settings and hooks are in place.
    async fn on_start(&self) -> Result<(), String> {
        Ok(())
    }

    /// Called before hooks and settings are removed.
    async fn on_stop(&self) -> Result<(), String> {
        Ok(())
    }

    /// Called last, after the plugin is unregistered.
    async fn on_unload(&self) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug)]
struct RegisteredPlugin {
    plugin: Arc<dyn Plugin>,
    /// Metadata captured at registration.
    info: PluginInfo,
}

/// Registry of all loaded plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Plugin ID → plugin and its metadata.
    plugins: RwLock<HashMap<String, RegisteredPlugin>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plugin under the ID from its [`PluginInfo`].
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> AppResult<PluginInfo> {
        let info = plugin.info();

        let mut plugins = self.plugins.write().await;
        if plugins.contains_key(&info.id) {
            return Err(AppError::conflict(format!(
                "Plugin '{}' is already registered",
                info.id
            )));
        }

        info!(
            plugin_id = %info.id,
            name = %info.name,
            version = %info.version,
            "Registering plugin"
        );

        plugins.insert(
            info.id.clone(),
            RegisteredPlugin {
                plugin,
                info: info.clone(),
            },
        );
        Ok(info)
    }

    /// Unregisters a plugin by ID, handing back the instance.
    pub async fn unregister(&self, plugin_id: &str) -> AppResult<Arc<dyn Plugin>> {
        let removed = self
            .plugins
            .write()
            .await
            .remove(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{}' not found", plugin_id)))?;

        info!(plugin_id = %plugin_id, "Plugin unregistered");
        Ok(removed.plugin)
    }

    /// Gets a plugin by ID.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).map(|entry| entry.plugin.clone())
    }

    /// Lists registered plugins by priority, then ID.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let plugins = self.plugins.read().await;
        let mut infos: Vec<PluginInfo> =
            plugins.values().map(|entry| entry.info.clone()).collect();
        infos.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));
        infos
    }
}
