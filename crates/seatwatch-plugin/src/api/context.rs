//! Plugin context: services and resources available to plugin handlers.

use std::sync::Arc;

use seatwatch_core::types::{MessageId, RoomId, UserId};

use super::http::{HttpRequest, HttpResponse};
use super::messaging::{ChatMessage, ChatRoom, ChatUser};

/// Context passed to plugins providing access to host services.
///
/// Plugins receive this when their hook handlers are built, giving them
/// access to their settings, the workspace messaging layer, and outbound HTTP.
#[derive(Clone)]
pub struct PluginContext {
    /// Settings reader, scoped to the owning plugin.
    pub settings: Arc<dyn PluginSettingsService>,
    /// Workspace users, rooms, and message delivery.
    pub messaging: Arc<dyn PluginMessagingService>,
    /// Outbound HTTP.
    pub http: Arc<dyn PluginHttpService>,
}

impl std::fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginContext").finish()
    }
}

/// Setting lookups available to plugins.
#[async_trait::async_trait]
pub trait PluginSettingsService: Send + Sync {
    /// Gets the current value of a setting, falling back to its package value.
    async fn value_by_id(&self, id: &str) -> Option<serde_json::Value>;

    /// Gets a string setting. Non-string values read as `None`.
    async fn string_by_id(&self, id: &str) -> Option<String> {
        match self.value_by_id(id).await? {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Gets a boolean setting. Accepts `"true"`/`"false"` strings.
    async fn bool_by_id(&self, id: &str) -> Option<bool> {
        match self.value_by_id(id).await? {
            serde_json::Value::Bool(b) => Some(b),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Gets a numeric setting. Accepts numeric strings.
    async fn number_by_id(&self, id: &str) -> Option<f64> {
        match self.value_by_id(id).await? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Workspace messaging operations available to plugins.
#[async_trait::async_trait]
pub trait PluginMessagingService: Send + Sync {
    /// Returns the plugin's own service account.
    async fn app_user(&self) -> Result<Option<ChatUser>, String>;

    /// Looks up a user by ID.
    async fn user_by_id(&self, user_id: &UserId) -> Result<Option<ChatUser>, String>;

    /// Looks up the direct-message room shared by exactly these users.
    async fn direct_room_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Option<ChatRoom>, String>;

    /// Creates a direct-message room between `creator` and `member_username`.
    async fn create_direct_room(
        &self,
        creator: &ChatUser,
        member_username: &str,
    ) -> Result<RoomId, String>;

    /// Looks up a room by ID.
    async fn room_by_id(&self, room_id: &RoomId) -> Result<Option<ChatRoom>, String>;

    /// Adds a user to a room. Fails if the user is already a member.
    async fn add_room_member(&self, room_id: &RoomId, user: &ChatUser) -> Result<(), String>;

    /// Sends a message.
    async fn send_message(&self, message: ChatMessage) -> Result<MessageId, String>;
}

/// Outbound HTTP operations available to plugins.
#[async_trait::async_trait]
pub trait PluginHttpService: Send + Sync {
    /// Issues a GET request.
    async fn get(&self, url: &str, request: HttpRequest) -> Result<HttpResponse, String>;

    /// Issues a POST request.
    async fn post(&self, url: &str, request: HttpRequest) -> Result<HttpResponse, String>;
}
