//! Error type for the license alert plugin.
//!
//! Every failure the notifier can hit is one variant here. None of them reach
//! the host: the notifier logs them and carries on with the next branch.

use seatwatch_core::error::AppError;
use thiserror::Error;

/// Failures while checking license usage or delivering an alert.
#[derive(Debug, Error)]
pub enum LicenseAlertError {
    /// The usage request could not be sent or its response not read.
    #[error("License usage request failed: {0}")]
    UsageRequest(String),

    /// The usage endpoint answered with something other than 200.
    #[error("Failed to fetch license info: {status} - {body}")]
    UsageStatus {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The usage response lacked numeric seat counts, or the seat limit was zero.
    #[error("Malformed license usage: {0}")]
    MalformedUsage(String),

    /// The plugin's own service account could not be resolved.
    #[error("App user not found")]
    ServiceAccountMissing,

    /// The user to notify does not exist.
    #[error("Notify user not found: {user_id}")]
    UserNotFound {
        /// The configured user ID.
        user_id: String,
    },

    /// No direct room could be found or created.
    #[error("Failed to retrieve the direct room with user {username}")]
    DirectRoomUnavailable {
        /// Username of the user to notify.
        username: String,
    },

    /// A target room does not exist.
    #[error("Room not found with ID: {room_id}")]
    RoomNotFound {
        /// The configured room ID.
        room_id: String,
    },

    /// The messaging service returned an error.
    #[error("Messaging error: {0}")]
    Messaging(String),

    /// The webhook request could not be sent.
    #[error("Error notifying endpoint: {0}")]
    WebhookRequest(String),

    /// The webhook endpoint answered with something other than 200.
    #[error("Failed to notify endpoint: {status} - {body}")]
    WebhookRejected {
        /// Response status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

impl From<LicenseAlertError> for AppError {
    fn from(err: LicenseAlertError) -> Self {
        match &err {
            LicenseAlertError::UsageStatus { .. } | LicenseAlertError::MalformedUsage(_) => {
                AppError::license(err.to_string())
            }
            LicenseAlertError::ServiceAccountMissing
            | LicenseAlertError::UserNotFound { .. }
            | LicenseAlertError::DirectRoomUnavailable { .. }
            | LicenseAlertError::RoomNotFound { .. } => AppError::not_found(err.to_string()),
            LicenseAlertError::UsageRequest(_)
            | LicenseAlertError::Messaging(_)
            | LicenseAlertError::WebhookRequest(_)
            | LicenseAlertError::WebhookRejected { .. } => {
                AppError::external_service(err.to_string())
            }
        }
    }
}
