//! License alert plugin implementation: registers with the SeatWatch plugin system.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use seatwatch_plugin::api::context::PluginContext;
use seatwatch_plugin::api::settings::SettingDescriptor;
use seatwatch_plugin::hooks::definitions::HookPoint;
use seatwatch_plugin::hooks::registry::HookHandler;
use seatwatch_plugin::registry::{Plugin, PluginInfo};

use crate::hooks::OnUserCreateHook;
use crate::notifier::Notifier;
use crate::settings::CATALOG;

/// Plugin ID used for settings, hooks, and the registry.
pub const PLUGIN_ID: &str = "license-alert";

/// Alerts when license seat usage reaches a threshold.
#[derive(Debug, Default)]
pub struct LicenseAlertPlugin;

impl LicenseAlertPlugin {
    /// Create a new license alert plugin
    pub fn new() -> Self {
        Self
    }

    /// Builds the hook handlers, bound to `ctx`, for `PluginManager::load_plugin`.
    pub fn hook_handlers(&self, ctx: PluginContext) -> Vec<(HookPoint, Arc<dyn HookHandler>)> {
        let notifier = Arc::new(Notifier::new(ctx));
        vec![(
            HookPoint::OnUserCreate,
            Arc::new(OnUserCreateHook::new(notifier)) as Arc<dyn HookHandler>,
        )]
    }
}

#[async_trait]
impl Plugin for LicenseAlertPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: PLUGIN_ID.to_string(),
            name: "License Alert".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Alerts a user, rooms, or an endpoint when license seat usage reaches a threshold".to_string(),
            author: "SeatWatch Team".to_string(),
            hooks: self
                .registered_hooks()
                .iter()
                .map(|h| h.as_str().to_string())
                .collect(),
            enabled: true,
            priority: 100,
        }
    }

    fn settings(&self) -> Vec<SettingDescriptor> {
        CATALOG.clone()
    }

    async fn on_load(&self) -> Result<(), String> {
        info!(plugin_id = PLUGIN_ID, "License alert plugin loaded");
        Ok(())
    }

    async fn on_unload(&self) -> Result<(), String> {
        info!(plugin_id = PLUGIN_ID, "License alert plugin unloaded");
        Ok(())
    }

    fn registered_hooks(&self) -> Vec<HookPoint> {
        vec![HookPoint::OnUserCreate]
    }
}
