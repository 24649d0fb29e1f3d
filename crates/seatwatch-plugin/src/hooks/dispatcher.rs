//! Hook dispatcher: fires hooks asynchronously and aggregates results.
//!
//! For `before_*` hooks:
//! - Handlers are called in priority order.
//! - If any handler returns `Halt`, execution stops and the main operation is aborted.
//!
//! For `after_*` / `on_*` hooks:
//! - All handlers are called regardless of individual results.
//! - Handlers are called in priority order.
//!
//! Every handler invocation is bounded by the dispatcher timeout; a handler
//! that exceeds it is treated as having returned `Continue`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use seatwatch_core::config::PluginConfig;
use seatwatch_core::error::AppError;
use seatwatch_core::result::AppResult;

use super::definitions::{HookAction, HookPayload, HookResult};
use super::registry::HookRegistry;

/// Aggregated result of dispatching a hook to all handlers.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    /// Whether execution was halted.
    pub halted: bool,
    /// Halt reason (if halted).
    pub halt_reason: Option<String>,
    /// Plugin that halted (if halted).
    pub halted_by: Option<String>,
    /// All individual handler results.
    pub results: Vec<HookResult>,
}

impl DispatchResult {
    fn empty() -> Self {
        Self {
            halted: false,
            halt_reason: None,
            halted_by: None,
            results: Vec::new(),
        }
    }
}

/// Dispatches hooks to all registered handlers.
#[derive(Debug)]
pub struct HookDispatcher {
    registry: Arc<HookRegistry>,
    handler_timeout: Duration,
}

impl HookDispatcher {
    /// Creates a new hook dispatcher with the given per-handler timeout.
    pub fn new(registry: Arc<HookRegistry>, handler_timeout: Duration) -> Self {
        Self {
            registry,
            handler_timeout,
        }
    }

    /// Creates a dispatcher using the timeout from the plugin configuration.
    pub fn from_config(registry: Arc<HookRegistry>, config: &PluginConfig) -> Self {
        Self::new(registry, Duration::from_secs(config.hook_timeout_seconds))
    }

    /// Dispatches a hook to all registered handlers.
    ///
    /// For `before_*` hooks, respects halt semantics.
    /// For other hooks, runs all handlers.
    pub async fn dispatch(&self, payload: &HookPayload) -> DispatchResult {
        let handlers = self.registry.get_handlers(&payload.hook).await;

        if handlers.is_empty() {
            return DispatchResult::empty();
        }

        debug!(
            hook = %payload.hook,
            handler_count = handlers.len(),
            "Dispatching hook"
        );

        let is_before_hook = payload.hook.is_before_hook();
        let mut dispatch = DispatchResult::empty();

        for handler in &handlers {
            let result = match tokio::time::timeout(self.handler_timeout, handler.handle(payload))
                .await
            {
                Ok(r) => r,
                Err(_) => {
                    error!(
                        hook = %payload.hook,
                        plugin_id = %handler.plugin_id(),
                        timeout_seconds = self.handler_timeout.as_secs(),
                        "Hook handler timed out"
                    );
                    HookResult::continue_execution(handler.plugin_id())
                }
            };

            match &result.action {
                HookAction::Continue => {
                    debug!(
                        hook = %payload.hook,
                        plugin_id = %result.plugin_id,
                        "Handler returned Continue"
                    );
                }
                HookAction::Halt { reason } => {
                    if is_before_hook {
                        info!(
                            hook = %payload.hook,
                            plugin_id = %result.plugin_id,
                            reason = %reason,
                            "Handler halted execution"
                        );
                        dispatch.halted = true;
                        dispatch.halt_reason = Some(reason.clone());
                        dispatch.halted_by = Some(result.plugin_id.clone());
                        dispatch.results.push(result);
                        break;
                    }
                    warn!(
                        hook = %payload.hook,
                        plugin_id = %result.plugin_id,
                        "Handler returned Halt for non-before hook, ignoring"
                    );
                }
            }

            dispatch.results.push(result);
        }

        dispatch
    }

    /// Fires a hook and returns an error if halted.
    ///
    /// Convenience method for `before_*` hooks where halt should abort the operation.
    pub async fn fire_or_halt(&self, payload: &HookPayload) -> AppResult<DispatchResult> {
        let result = self.dispatch(payload).await;

        if result.halted {
            let reason = result
                .halt_reason
                .clone()
                .unwrap_or_else(|| "Hook halted execution".to_string());
            let plugin = result
                .halted_by
                .clone()
                .unwrap_or_else(|| "unknown".to_string());

            return Err(AppError::plugin(format!(
                "Operation blocked by plugin '{}': {}",
                plugin, reason
            )));
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::hooks::definitions::HookPoint;
    use crate::hooks::registry::HookHandler;

    #[derive(Debug)]
    struct RecordingHandler {
        id: String,
        priority: i32,
        halt: bool,
        delay: Option<Duration>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingHandler {
        fn new(id: &str, priority: i32, calls: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                id: id.to_string(),
                priority,
                halt: false,
                delay: None,
                calls,
            }
        }
    }

    #[async_trait]
    impl HookHandler for RecordingHandler {
        async fn handle(&self, _payload: &HookPayload) -> HookResult {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.calls.lock().unwrap().push(self.id.clone());
            if self.halt {
                HookResult::halt(&self.id, "blocked")
            } else {
                HookResult::continue_execution(&self.id)
            }
        }

        fn plugin_id(&self) -> &str {
            &self.id
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    async fn register(registry: &HookRegistry, hook: HookPoint, handler: RecordingHandler) {
        let plugin_id = handler.id.clone();
        registry
            .register_plugin(
                &plugin_id,
                vec![(hook, Arc::new(handler) as Arc<dyn HookHandler>)],
            )
            .await
            .expect("register");
    }

    fn dispatcher(registry: Arc<HookRegistry>) -> HookDispatcher {
        HookDispatcher::new(registry, Duration::from_secs(30))
    }

    #[tokio::test]
    async fn test_handlers_run_in_priority_order() {
        let registry = Arc::new(HookRegistry::new());
        let calls = Arc::new(Mutex::new(Vec::new()));

        register(
            &registry,
            HookPoint::OnUserCreate,
            RecordingHandler::new("late", 200, calls.clone()),
        )
        .await;
        register(
            &registry,
            HookPoint::OnUserCreate,
            RecordingHandler::new("early", 10, calls.clone()),
        )
        .await;

        let result = dispatcher(registry)
            .dispatch(&HookPayload::new(HookPoint::OnUserCreate))
            .await;

        assert!(!result.halted);
        assert_eq!(result.results.len(), 2);
        assert_eq!(*calls.lock().unwrap(), vec!["early", "late"]);
    }

    #[tokio::test]
    async fn test_halt_ignored_for_on_hooks() {
        let registry = Arc::new(HookRegistry::new());
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut halting = RecordingHandler::new("halting", 1, calls.clone());
        halting.halt = true;
        register(&registry, HookPoint::OnUserCreate, halting).await;
        register(
            &registry,
            HookPoint::OnUserCreate,
            RecordingHandler::new("after", 2, calls.clone()),
        )
        .await;

        let result = dispatcher(registry)
            .dispatch(&HookPayload::new(HookPoint::OnUserCreate))
            .await;

        assert!(!result.halted);
        assert_eq!(*calls.lock().unwrap(), vec!["halting", "after"]);
    }

    #[tokio::test]
    async fn test_halt_stops_before_hooks() {
        let registry = Arc::new(HookRegistry::new());
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut halting = RecordingHandler::new("gate", 1, calls.clone());
        halting.halt = true;
        register(&registry, HookPoint::BeforeUserCreate, halting).await;
        register(
            &registry,
            HookPoint::BeforeUserCreate,
            RecordingHandler::new("never", 2, calls.clone()),
        )
        .await;

        let err = dispatcher(registry)
            .fire_or_halt(&HookPayload::new(HookPoint::BeforeUserCreate))
            .await
            .unwrap_err();

        assert!(err.message.contains("gate"));
        assert_eq!(*calls.lock().unwrap(), vec!["gate"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_handler_times_out_as_continue() {
        let registry = Arc::new(HookRegistry::new());
        let calls = Arc::new(Mutex::new(Vec::new()));

        let mut slow = RecordingHandler::new("slow", 1, calls.clone());
        slow.delay = Some(Duration::from_secs(120));
        register(&registry, HookPoint::OnUserCreate, slow).await;
        register(
            &registry,
            HookPoint::OnUserCreate,
            RecordingHandler::new("fast", 2, calls.clone()),
        )
        .await;

        let result = HookDispatcher::new(registry, Duration::from_secs(5))
            .dispatch(&HookPayload::new(HookPoint::OnUserCreate))
            .await;

        assert_eq!(result.results.len(), 2);
        assert!(matches!(result.results[0].action, HookAction::Continue));
        assert_eq!(*calls.lock().unwrap(), vec!["fast"]);
    }
}
