//! Hook registry: handlers grouped by owning plugin, served per hook point in
//! priority order.
//!
//! A plugin registers all of its handlers in one call and loses them in one
//! call, so a load that fails partway never leaves some of its hooks behind.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use seatwatch_core::error::AppError;
use seatwatch_core::result::AppResult;

use super::definitions::{HookPayload, HookPoint, HookResult};

/// Trait for hook handler implementations.
#[async_trait]
pub trait HookHandler: Send + Sync + std::fmt::Debug {
    /// Handles a hook invocation.
    async fn handle(&self, payload: &HookPayload) -> HookResult;

    /// Returns the plugin ID owning this handler.
    fn plugin_id(&self) -> &str;

    /// Returns the priority (lower = runs first).
    fn priority(&self) -> i32;
}

/// Entry in the hook registry.
#[derive(Debug)]
struct HookEntry {
    /// Hook point the handler is bound to.
    hook: HookPoint,
    /// The handler.
    handler: Arc<dyn HookHandler>,
    /// Priority (lower = earlier execution).
    priority: i32,
    /// Registration order, breaks ties between equal priorities.
    sequence: u64,
}

#[derive(Debug, Default)]
struct Handlers {
    /// Plugin ID → every handler that plugin registered.
    by_plugin: HashMap<String, Vec<HookEntry>>,
    /// Sequence number handed to the next entry.
    next_sequence: u64,
}

/// Registry of hook handlers, keyed by the plugin that owns them.
#[derive(Debug, Default)]
pub struct HookRegistry {
    handlers: RwLock<Handlers>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers every handler of one plugin and returns how many were added.
    ///
    /// Nothing is registered if the plugin already has handlers or if any
    /// handler reports a different owning plugin.
    pub async fn register_plugin(
        &self,
        plugin_id: &str,
        handlers: Vec<(HookPoint, Arc<dyn HookHandler>)>,
    ) -> AppResult<usize> {
        if let Some((hook, foreign)) = handlers.iter().find(|(_, h)| h.plugin_id() != plugin_id) {
            return Err(AppError::plugin(format!(
                "Handler for '{}' is owned by '{}', not '{}'",
                hook,
                foreign.plugin_id(),
                plugin_id
            )));
        }

        let mut registry = self.handlers.write().await;
        if registry.by_plugin.contains_key(plugin_id) {
            return Err(AppError::conflict(format!(
                "Hooks for plugin '{}' are already registered",
                plugin_id
            )));
        }

        let mut entries = Vec::with_capacity(handlers.len());
        for (hook, handler) in handlers {
            let priority = handler.priority();
            let sequence = registry.next_sequence;
            registry.next_sequence += 1;

            info!(
                hook = %hook,
                plugin_id = %plugin_id,
                priority = priority,
                "Hook handler registered"
            );

            entries.push(HookEntry {
                hook,
                handler,
                priority,
                sequence,
            });
        }

        let count = entries.len();
        registry.by_plugin.insert(plugin_id.to_string(), entries);
        Ok(count)
    }

    /// Removes every handler a plugin registered and returns how many there were.
    pub async fn unregister_plugin(&self, plugin_id: &str) -> usize {
        let removed = self
            .handlers
            .write()
            .await
            .by_plugin
            .remove(plugin_id)
            .map_or(0, |entries| entries.len());

        info!(plugin_id = %plugin_id, removed, "Hooks unregistered for plugin");
        removed
    }

    /// Returns the handlers bound to `hook`, by priority then registration order.
    pub async fn get_handlers(&self, hook: &HookPoint) -> Vec<Arc<dyn HookHandler>> {
        let registry = self.handlers.read().await;

        let mut matching: Vec<&HookEntry> = registry
            .by_plugin
            .values()
            .flatten()
            .filter(|entry| &entry.hook == hook)
            .collect();
        matching.sort_by_key(|entry| (entry.priority, entry.sequence));

        matching
            .into_iter()
            .map(|entry| entry.handler.clone())
            .collect()
    }
}
