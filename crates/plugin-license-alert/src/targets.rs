//! Who to alert, read fresh from settings on every check.

use serde_json::Value;

use seatwatch_core::types::{RoomId, UserId};
use seatwatch_plugin::api::context::PluginSettingsService;

use crate::license::WorkspaceCredentials;
use crate::settings;

/// One room in a room setting: either a bare ID or an object carrying `_id` or `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEntry {
    primary_id: Option<String>,
    id: Option<String>,
}

impl RoomEntry {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self {
                primary_id: None,
                id: Some(s.clone()),
            }),
            Value::Object(map) => Some(Self {
                primary_id: map.get("_id").and_then(Value::as_str).map(str::to_string),
                id: map.get("id").and_then(Value::as_str).map(str::to_string),
            }),
            _ => None,
        }
    }

    /// `_id` if non-empty, else `id` if non-empty.
    pub fn room_id(&self) -> Option<&str> {
        self.primary_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or(self.id.as_deref().filter(|id| !id.is_empty()))
    }
}

/// The shapes a room setting value can take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomReference {
    /// A single room ID.
    Single(String),
    /// A list of rooms.
    Many(Vec<RoomEntry>),
    /// One room object.
    Structured(RoomEntry),
    /// Anything else, including a missing value.
    Unrecognized,
}

impl RoomReference {
    /// Classifies a raw setting value.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::Single(s.clone()),
            Some(Value::Array(items)) => {
                Self::Many(items.iter().filter_map(RoomEntry::from_value).collect())
            }
            Some(object @ Value::Object(_)) => RoomEntry::from_value(object)
                .map(Self::Structured)
                .unwrap_or(Self::Unrecognized),
            _ => Self::Unrecognized,
        }
    }

    /// Room IDs in input order, with empty or missing IDs dropped.
    pub fn room_ids(&self) -> Vec<RoomId> {
        match self {
            Self::Single(id) if !id.is_empty() => vec![RoomId::new(id.as_str())],
            Self::Single(_) | Self::Unrecognized => Vec::new(),
            Self::Many(entries) => entries
                .iter()
                .filter_map(RoomEntry::room_id)
                .map(RoomId::new)
                .collect(),
            Self::Structured(entry) => entry.room_id().map(RoomId::new).into_iter().collect(),
        }
    }
}

/// Where alerts should be delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationTargets {
    /// Send a direct message.
    pub notify_user: bool,
    /// User to direct-message.
    pub notify_user_id: Option<UserId>,
    /// Broadcast to rooms.
    pub notify_room: bool,
    /// Rooms to broadcast to, in order.
    pub room_ids: Vec<RoomId>,
    /// POST to an external endpoint.
    pub notify_endpoint: bool,
    /// Endpoint to POST to.
    pub endpoint_url: Option<String>,
}

impl NotificationTargets {
    /// Reads the targets from settings. Unset toggles read as `false`.
    pub async fn load(reader: &dyn PluginSettingsService) -> Self {
        let room_setting = reader.value_by_id(settings::NOTIFY_ROOM_ID).await;

        Self {
            notify_user: reader.bool_by_id(settings::NOTIFY_USER).await.unwrap_or(false),
            notify_user_id: non_empty(reader.string_by_id(settings::NOTIFY_USER_ID).await)
                .map(UserId::new),
            notify_room: reader.bool_by_id(settings::NOTIFY_ROOM).await.unwrap_or(false),
            room_ids: RoomReference::from_value(room_setting.as_ref()).room_ids(),
            notify_endpoint: reader
                .bool_by_id(settings::NOTIFY_ENDPOINT)
                .await
                .unwrap_or(false),
            endpoint_url: non_empty(reader.string_by_id(settings::NOTIFY_ENDPOINT_URL).await),
        }
    }
}

/// Everything the notifier reads from settings for one check.
#[derive(Debug, Clone, Default)]
pub struct AlertSettings {
    /// Workspace API access.
    pub workspace: WorkspaceCredentials,
    /// Usage percentage that triggers alerts. `None` never triggers.
    pub threshold: Option<f64>,
    /// Delivery targets.
    pub targets: NotificationTargets,
}

impl AlertSettings {
    /// Reads all alert settings.
    pub async fn load(reader: &dyn PluginSettingsService) -> Self {
        let workspace = WorkspaceCredentials {
            url: reader
                .string_by_id(settings::WORKSPACE_URL)
                .await
                .unwrap_or_default(),
            user_id: reader
                .string_by_id(settings::WORKSPACE_USER_ID)
                .await
                .unwrap_or_default(),
            auth_token: reader
                .string_by_id(settings::WORKSPACE_AUTH_TOKEN)
                .await
                .unwrap_or_default(),
        };

        Self {
            workspace,
            threshold: reader.number_by_id(settings::LICENSE_USAGE_THRESHOLD).await,
            targets: NotificationTargets::load(reader).await,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ids(value: Value) -> Vec<String> {
        RoomReference::from_value(Some(&value))
            .room_ids()
            .into_iter()
            .map(RoomId::into_inner)
            .collect()
    }

    #[test]
    fn test_single_string() {
        assert_eq!(ids(json!("GENERAL")), vec!["GENERAL"]);
        assert!(ids(json!("")).is_empty());
    }

    #[test]
    fn test_list_of_objects_keeps_order() {
        let value = json!([
            {"_id": "r1", "name": "ops"},
            {"id": "r2"},
            {"_id": "", "id": "r3"},
            {"name": "no id"},
            {"_id": "r4", "id": "ignored"},
        ]);
        assert_eq!(ids(value), vec!["r1", "r2", "r3", "r4"]);
    }

    #[test]
    fn test_list_accepts_bare_ids() {
        assert_eq!(ids(json!(["r1", "", {"_id": "r2"}, 7])), vec!["r1", "r2"]);
    }

    #[test]
    fn test_single_object() {
        assert_eq!(ids(json!({"_id": "r1"})), vec!["r1"]);
        assert_eq!(ids(json!({"id": "r2"})), vec!["r2"]);
        assert!(ids(json!({"name": "ops"})).is_empty());
    }

    #[test]
    fn test_unrecognized_shapes_are_empty() {
        assert_eq!(
            RoomReference::from_value(Some(&json!(42))),
            RoomReference::Unrecognized
        );
        assert_eq!(RoomReference::from_value(None), RoomReference::Unrecognized);
        assert!(ids(json!(null)).is_empty());
        assert!(ids(json!(true)).is_empty());
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            RoomReference::from_value(Some(&json!("r1"))),
            RoomReference::Single("r1".to_string())
        );
        assert!(matches!(
            RoomReference::from_value(Some(&json!([{"_id": "r1"}]))),
            RoomReference::Many(entries) if entries.len() == 1
        ));
        assert!(matches!(
            RoomReference::from_value(Some(&json!({"_id": "r1"}))),
            RoomReference::Structured(_)
        ));
    }
}
