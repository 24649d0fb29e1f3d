//! Workspace users, rooms, and messages as seen by plugins.

use serde::{Deserialize, Serialize};

use seatwatch_core::types::{RoomId, UserId};

/// A workspace user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    /// User ID.
    pub id: UserId,
    /// Unique username.
    pub username: String,
    /// Display name.
    pub name: Option<String>,
}

/// Kind of room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// Public channel.
    Channel,
    /// Private group.
    PrivateGroup,
    /// Two-party direct message.
    DirectMessage,
    /// Omnichannel conversation.
    Livechat,
}

/// A room messages can be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    /// Room ID.
    pub id: RoomId,
    /// Kind of room.
    pub room_type: RoomType,
    /// Human readable name.
    pub display_name: Option<String>,
    /// URL-safe name.
    pub slugified_name: Option<String>,
}

impl ChatRoom {
    /// Name for log lines: display name, then slug, then the raw ID.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or(self.slugified_name.as_deref().filter(|slug| !slug.is_empty()))
            .unwrap_or(self.id.as_str())
    }
}

/// A text message ready to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Destination room.
    pub room_id: RoomId,
    /// Sending user.
    pub sender_id: UserId,
    /// Message text (markdown).
    pub text: String,
}

impl ChatMessage {
    /// Creates a message from `sender` into `room`.
    pub fn new(room: &ChatRoom, sender: &ChatUser, text: impl Into<String>) -> Self {
        Self {
            room_id: room.id.clone(),
            sender_id: sender.id.clone(),
            text: text.into(),
        }
    }
}
