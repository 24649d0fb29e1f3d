//! Plugin manager: lifecycle management for all plugins.

use std::sync::Arc;

use tracing::{error, info, warn};

use seatwatch_core::config::PluginConfig;
use seatwatch_core::error::AppError;
use seatwatch_core::result::AppResult;

use crate::api::context::{PluginContext, PluginHttpService, PluginMessagingService};
use crate::api::settings::SettingsStore;
use crate::hooks::definitions::HookPoint;
use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::{HookHandler, HookRegistry};
use crate::registry::{Plugin, PluginInfo, PluginRegistry};

/// Manages the full lifecycle of plugins: load, start, stop, unload.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    plugin_registry: Arc<PluginRegistry>,
    /// Hook registry.
    hook_registry: Arc<HookRegistry>,
    /// Hook dispatcher.
    hook_dispatcher: Arc<HookDispatcher>,
    /// Settings of every loaded plugin.
    settings_store: Arc<SettingsStore>,
    /// Host configuration, including setting overrides.
    config: PluginConfig,
}

impl PluginManager {
    /// Creates a new plugin manager.
    pub fn new(config: &PluginConfig) -> Self {
        let hook_registry = Arc::new(HookRegistry::new());
        let hook_dispatcher = Arc::new(HookDispatcher::from_config(
            hook_registry.clone(),
            config,
        ));

        Self {
            plugin_registry: Arc::new(PluginRegistry::new()),
            hook_registry,
            hook_dispatcher,
            settings_store: Arc::new(SettingsStore::new()),
            config: config.clone(),
        }
    }

    /// Builds the context a plugin's handlers run against.
    ///
    /// Settings are scoped to `plugin_id`; messaging and HTTP are shared.
    pub fn context_for(
        &self,
        plugin_id: &str,
        messaging: Arc<dyn PluginMessagingService>,
        http: Arc<dyn PluginHttpService>,
    ) -> PluginContext {
        PluginContext {
            settings: Arc::new(self.settings_store.scoped(plugin_id)),
            messaging,
            http,
        }
    }

    /// Loads and starts a compiled-in plugin.
    ///
    /// Settings declared by the plugin are provided to the store and
    /// overlaid with any values configured under `plugins.settings.<id>`.
    /// If any step after registration fails, the plugin's hooks, settings,
    /// and registration are all removed again.
    pub async fn load_plugin(
        &self,
        plugin: Arc<dyn Plugin>,
        handlers: Vec<(HookPoint, Arc<dyn HookHandler>)>,
    ) -> AppResult<()> {
        let info = plugin.info();
        let plugin_id = info.id.clone();

        // Load
        plugin.on_load().await.map_err(|e| {
            AppError::plugin(format!("Plugin '{}' load failed: {}", plugin_id, e))
        })?;

        // Register
        self.plugin_registry.register(plugin.clone()).await?;

        // Settings and hooks
        if let Err(e) = self.install(plugin.as_ref(), &plugin_id, handlers).await {
            self.roll_back(&plugin_id).await;
            return Err(e);
        }

        // Start
        if let Err(e) = plugin.on_start().await {
            error!(plugin_id = %plugin_id, error = %e, "Plugin start failed");
            self.roll_back(&plugin_id).await;
            return Err(AppError::plugin(format!(
                "Plugin '{}' start failed: {}",
                plugin_id, e
            )));
        }

        info!(
            plugin_id = %plugin_id,
            name = %info.name,
            version = %info.version,
            hooks = info.hooks.len(),
            "Plugin loaded and started"
        );

        Ok(())
    }

    async fn install(
        &self,
        plugin: &dyn Plugin,
        plugin_id: &str,
        handlers: Vec<(HookPoint, Arc<dyn HookHandler>)>,
    ) -> AppResult<()> {
        self.provide_settings(plugin, plugin_id).await?;
        self.hook_registry
            .register_plugin(plugin_id, handlers)
            .await?;
        Ok(())
    }

    async fn roll_back(&self, plugin_id: &str) {
        self.hook_registry.unregister_plugin(plugin_id).await;
        self.settings_store.remove(plugin_id).await;
        if let Err(e) = self.plugin_registry.unregister(plugin_id).await {
            warn!(plugin_id = %plugin_id, error = %e, "Rollback could not unregister plugin");
        }
    }

    async fn provide_settings(&self, plugin: &dyn Plugin, plugin_id: &str) -> AppResult<()> {
        self.settings_store
            .provide(plugin_id, plugin.settings())
            .await?;

        if let Some(overrides) = self.config.settings.get(plugin_id) {
            for (setting_id, value) in overrides {
                self.settings_store
                    .set_value(plugin_id, setting_id, value.clone())
                    .await?;
            }
        }

        let missing = self.settings_store.missing_required(plugin_id).await;
        if !missing.is_empty() {
            warn!(
                plugin_id = %plugin_id,
                missing = ?missing,
                "Required plugin settings have no value"
            );
        }

        Ok(())
    }

    /// Stops and unloads a plugin.
    pub async fn unload_plugin(&self, plugin_id: &str) -> AppResult<()> {
        let plugin = self
            .plugin_registry
            .get(plugin_id)
            .await
            .ok_or_else(|| AppError::not_found(format!("Plugin '{}' not found", plugin_id)))?;

        // Stop
        if let Err(e) = plugin.on_stop().await {
            warn!(
                plugin_id = %plugin_id,
                error = %e,
                "Plugin stop returned error"
            );
        }

        self.hook_registry.unregister_plugin(plugin_id).await;
        self.settings_store.remove(plugin_id).await;
        self.plugin_registry.unregister(plugin_id).await?;

        // Unload
        if let Err(e) = plugin.on_unload().await {
            warn!(
                plugin_id = %plugin_id,
                error = %e,
                "Plugin unload returned error"
            );
        }

        info!(plugin_id = %plugin_id, "Plugin unloaded");

        Ok(())
    }

    /// Stops and unloads every plugin, for host shutdown.
    ///
    /// A plugin that fails to unload is logged and skipped.
    pub async fn unload_all(&self) {
        let plugins = self.plugin_registry.list().await;

        for info in &plugins {
            if let Err(e) = self.unload_plugin(&info.id).await {
                error!(
                    plugin_id = %info.id,
                    error = %e,
                    "Error unloading plugin"
                );
            }
        }

        info!(count = plugins.len(), "All plugins unloaded");
    }

    /// Returns the hook dispatcher for firing hooks.
    pub fn dispatcher(&self) -> &Arc<HookDispatcher> {
        &self.hook_dispatcher
    }

    /// Returns the settings store.
    pub fn settings_store(&self) -> &Arc<SettingsStore> {
        &self.settings_store
    }

    /// Lists all loaded plugins.
    pub async fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugin_registry.list().await
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new(&PluginConfig::default())
    }
}
