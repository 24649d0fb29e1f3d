//! All hook point definitions with typed payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use seatwatch_core::events::{DomainEvent, EventPayload, UserEvent};
use seatwatch_core::types::UserId;

/// Enumeration of all hook points in the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    /// Fired before a user account is created. Can halt.
    BeforeUserCreate,
    /// Fired after a new user account is created.
    OnUserCreate,
}

impl HookPoint {
    /// Returns the string name of this hook point.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeUserCreate => "before_user_create",
            Self::OnUserCreate => "on_user_create",
        }
    }

    /// Returns whether this is a "before" hook that supports halt semantics.
    pub fn is_before_hook(&self) -> bool {
        matches!(self, Self::BeforeUserCreate)
    }
}

impl std::fmt::Display for HookPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload passed to hook handlers: a flexible key-value map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookPayload {
    /// The hook point being fired.
    pub hook: HookPoint,
    /// Arbitrary data keyed by string.
    pub data: HashMap<String, serde_json::Value>,
    /// The actor (user) who triggered this event.
    pub actor_id: Option<UserId>,
    /// Timestamp of the event.
    pub timestamp: DateTime<Utc>,
}

impl HookPayload {
    /// Creates a new hook payload.
    pub fn new(hook: HookPoint) -> Self {
        Self {
            hook,
            data: HashMap::new(),
            actor_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Builds the payload for a domain event, carrying over its actor and timestamp.
    ///
    /// `user_id` and `username` are stored under the keys of the same name.
    pub fn from_event(event: &DomainEvent) -> Self {
        let mut payload = match &event.payload {
            EventPayload::User(UserEvent::Created { user_id, username }) => {
                Self::new(HookPoint::OnUserCreate)
                    .with_string("user_id", user_id.as_str())
                    .with_string("username", username)
            }
        };

        payload.actor_id = event.actor_id.clone();
        payload.timestamp = event.timestamp;
        payload
    }

    /// Inserts a typed data value.
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    /// Inserts a string value.
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with_data(key, serde_json::json!(value))
    }

    /// Gets a string data value.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }

    /// Gets a user ID stored as a string.
    pub fn get_user_id(&self, key: &str) -> Option<UserId> {
        self.get_string(key).map(UserId::from)
    }
}

/// Action returned by a hook handler telling the dispatcher what to do next.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum HookAction {
    /// Continue to the next handler.
    Continue,
    /// Halt execution: no further handlers or the main operation will run.
    Halt {
        /// Reason for halting.
        reason: String,
    },
}

/// Result returned from a hook handler invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResult {
    /// The action the handler wants the dispatcher to take.
    pub action: HookAction,
    /// Optional output data from the handler.
    pub output: Option<serde_json::Value>,
    /// Plugin ID that produced this result.
    pub plugin_id: String,
}

impl HookResult {
    /// Creates a continue result.
    pub fn continue_execution(plugin_id: &str) -> Self {
        Self {
            action: HookAction::Continue,
            output: None,
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Creates a halt result.
    pub fn halt(plugin_id: &str, reason: &str) -> Self {
        Self {
            action: HookAction::Halt {
                reason: reason.to_string(),
            },
            output: None,
            plugin_id: plugin_id.to_string(),
        }
    }

    /// Creates a continue result with output data.
    pub fn continue_with_output(plugin_id: &str, output: serde_json::Value) -> Self {
        Self {
            action: HookAction::Continue,
            output: Some(output),
            plugin_id: plugin_id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_created_event_maps_to_on_user_create() {
        let event = DomainEvent::user_created(UserId::from("u-42"), "new.hire");
        let payload = HookPayload::from_event(&event);

        assert_eq!(payload.hook, HookPoint::OnUserCreate);
        assert_eq!(payload.get_user_id("user_id"), Some(UserId::from("u-42")));
        assert_eq!(payload.get_string("username"), Some("new.hire"));
        assert_eq!(payload.timestamp, event.timestamp);
    }

    #[test]
    fn test_only_before_hooks_can_halt() {
        assert!(HookPoint::BeforeUserCreate.is_before_hook());
        assert!(!HookPoint::OnUserCreate.is_before_hook());
        assert_eq!(HookPoint::OnUserCreate.to_string(), "on_user_create");
    }
}
