//! Newtype wrappers around the opaque string identifiers used by the chat
//! workspace.
//!
//! Using distinct types prevents accidentally passing a `UserId` where a
//! `RoomId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `String`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Return the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a workspace user account.
    UserId
);

define_id!(
    /// Identifier of a room (channel, private group, or direct message).
    RoomId
);

define_id!(
    /// Identifier of a sent message.
    MessageId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_display() {
        let id = RoomId::from("GENERAL");
        assert_eq!(id.to_string(), "GENERAL");
        assert_eq!(id.as_str(), "GENERAL");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = UserId::new("aB3xYz");
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, "\"aB3xYz\"");
    }
}
