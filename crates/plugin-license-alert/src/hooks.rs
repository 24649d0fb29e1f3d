//! Hook implementations for the license alert plugin.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use seatwatch_plugin::hooks::definitions::{HookPayload, HookResult};
use seatwatch_plugin::hooks::registry::HookHandler;

use crate::notifier::Notifier;
use crate::plugin::PLUGIN_ID;

/// Hook handler for on_user_create: check license usage and alert.
#[derive(Debug)]
pub struct OnUserCreateHook {
    notifier: Arc<Notifier>,
}

impl OnUserCreateHook {
    /// Create a new on_user_create hook handler
    pub fn new(notifier: Arc<Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl HookHandler for OnUserCreateHook {
    async fn handle(&self, payload: &HookPayload) -> HookResult {
        let user_id = payload.get_user_id("user_id");
        if user_id.is_none() {
            warn!("on_user_create payload has no user_id, checking license usage anyway");
        }
        let username = payload.get_string("username").unwrap_or_default();

        let outcome = self.notifier.notify(user_id.as_ref(), username).await;

        match serde_json::to_value(&outcome) {
            Ok(output) => HookResult::continue_with_output(PLUGIN_ID, output),
            Err(_) => HookResult::continue_execution(PLUGIN_ID),
        }
    }

    fn plugin_id(&self) -> &str {
        PLUGIN_ID
    }

    fn priority(&self) -> i32 {
        100
    }
}
