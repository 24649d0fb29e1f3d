//! User-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Events related to user accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UserEvent {
    /// A new user account was created.
    Created {
        /// The user ID.
        user_id: UserId,
        /// The username.
        username: String,
    },
}
