//! The license usage check and alert fan-out run for each new user.
//!
//! A check fetches seat usage, compares it to the threshold, and when the
//! threshold is reached runs up to three independent branches: a direct
//! message, room broadcasts, and a webhook. Every failure is logged and
//! contained to its branch (or to its single room), so one bad target never
//! stops the others and nothing is reported back to account creation.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use seatwatch_core::types::{MessageId, RoomId, UserId};
use seatwatch_plugin::api::context::PluginContext;
use seatwatch_plugin::api::messaging::{ChatMessage, ChatRoom, ChatUser};

use crate::error::LicenseAlertError;
use crate::license::{LicenseUsage, fetch_usage};
use crate::message::alert_text;
use crate::targets::AlertSettings;
use crate::webhook::{WebhookPayload, post_alert};

/// What a single check did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertOutcome {
    /// Usage reading, when the lookup succeeded.
    pub usage: Option<LicenseUsage>,
    /// Whether usage reached the threshold.
    pub threshold_exceeded: bool,
    /// Whether the direct message went out.
    pub direct_message_sent: bool,
    /// Rooms that received the alert, in order.
    pub rooms_notified: Vec<RoomId>,
    /// Whether the endpoint answered 200.
    pub endpoint_notified: bool,
}

/// Runs license checks against the host services in a [`PluginContext`].
#[derive(Debug, Clone)]
pub struct Notifier {
    ctx: PluginContext,
}

impl Notifier {
    /// Creates a notifier bound to the given host services.
    pub fn new(ctx: PluginContext) -> Self {
        Self { ctx }
    }

    /// Checks license usage after `username` was created and alerts if needed.
    ///
    /// The new user's ID is only logged; the check runs without it. Never
    /// fails; the outcome is informational.
    pub async fn notify(&self, user_id: Option<&UserId>, username: &str) -> AlertOutcome {
        match user_id {
            Some(user_id) => info!(user_id = %user_id, "New user created: {}", username),
            None => info!("New user created without an ID: {}", username),
        }

        let settings = AlertSettings::load(self.ctx.settings.as_ref()).await;

        let usage = match fetch_usage(self.ctx.http.as_ref(), &settings.workspace).await {
            Ok(usage) => usage,
            Err(e @ LicenseAlertError::MalformedUsage(_)) => {
                warn!(error = %e, "License usage unavailable, skipping alert");
                return AlertOutcome::default();
            }
            Err(e) => {
                error!(error = %e, "License usage check failed");
                return AlertOutcome::default();
            }
        };

        let mut outcome = AlertOutcome {
            usage: Some(usage),
            ..AlertOutcome::default()
        };

        let Some(threshold) = settings.threshold else {
            warn!("License usage threshold is not a number, skipping alert");
            return outcome;
        };

        if !usage.exceeds(threshold) {
            debug!(
                percentage_used = usage.percentage_used,
                threshold, "License usage below threshold"
            );
            return outcome;
        }

        outcome.threshold_exceeded = true;
        info!("License usage exceeds threshold: {}%", threshold);

        let text = alert_text(&settings.workspace.url, &usage);
        let targets = &settings.targets;

        if targets.notify_user {
            outcome.direct_message_sent = self
                .notify_user(targets.notify_user_id.as_ref(), &text)
                .await;
        }

        debug!(
            notify_room = targets.notify_room,
            room_ids = ?targets.room_ids,
            "Room targets resolved"
        );

        if targets.notify_room && !targets.room_ids.is_empty() {
            outcome.rooms_notified = self.notify_rooms(&targets.room_ids, &text).await;
        }

        if targets.notify_endpoint {
            outcome.endpoint_notified = self
                .notify_endpoint(
                    targets.endpoint_url.as_deref(),
                    &settings.workspace.url,
                    &usage,
                )
                .await;
        }

        outcome
    }

    async fn notify_user(&self, user_id: Option<&UserId>, text: &str) -> bool {
        let Some(user_id) = user_id else {
            info!("User notification enabled without a user ID, skipping");
            return false;
        };

        info!(user_id = %user_id, "Notifying user");

        match self.send_direct_message(user_id, text).await {
            Ok(message_id) => {
                info!(message_id = %message_id, "Direct message sent successfully");
                true
            }
            Err(e) => {
                error!(user_id = %user_id, error = %e, "Direct message not sent");
                false
            }
        }
    }

    async fn send_direct_message(
        &self,
        user_id: &UserId,
        text: &str,
    ) -> Result<MessageId, LicenseAlertError> {
        let messaging = self.ctx.messaging.as_ref();

        let app_user = messaging
            .app_user()
            .await
            .map_err(LicenseAlertError::Messaging)?
            .ok_or(LicenseAlertError::ServiceAccountMissing)?;

        let target = messaging
            .user_by_id(user_id)
            .await
            .map_err(LicenseAlertError::Messaging)?
            .ok_or_else(|| LicenseAlertError::UserNotFound {
                user_id: user_id.to_string(),
            })?;

        let room = self.direct_room(&app_user, &target).await?;

        messaging
            .send_message(ChatMessage::new(&room, &app_user, text))
            .await
            .map_err(LicenseAlertError::Messaging)
    }

    /// Finds the direct room between the service account and `target`, creating it if needed.
    async fn direct_room(
        &self,
        app_user: &ChatUser,
        target: &ChatUser,
    ) -> Result<ChatRoom, LicenseAlertError> {
        let messaging = self.ctx.messaging.as_ref();
        let usernames = [app_user.username.clone(), target.username.clone()];

        if let Some(room) = messaging
            .direct_room_by_usernames(&usernames)
            .await
            .map_err(LicenseAlertError::Messaging)?
        {
            return Ok(room);
        }

        info!(
            "Direct message room not found for user: {}, creating one",
            target.username
        );

        let room_id = messaging
            .create_direct_room(app_user, &target.username)
            .await
            .map_err(LicenseAlertError::Messaging)?;

        let room = messaging
            .direct_room_by_usernames(&usernames)
            .await
            .map_err(LicenseAlertError::Messaging)?
            .ok_or_else(|| LicenseAlertError::DirectRoomUnavailable {
                username: target.username.clone(),
            })?;

        info!(room_id = %room_id, "Direct message room created");
        Ok(room)
    }

    async fn notify_rooms(&self, room_ids: &[RoomId], text: &str) -> Vec<RoomId> {
        let app_user = match self.ctx.messaging.app_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!("{}", LicenseAlertError::ServiceAccountMissing);
                return Vec::new();
            }
            Err(e) => {
                error!(error = %e, "App user lookup failed");
                return Vec::new();
            }
        };

        let mut delivered = Vec::with_capacity(room_ids.len());
        for room_id in room_ids {
            match self.broadcast_to_room(&app_user, room_id, text).await {
                Ok(room) => {
                    info!(room_id = %room.id, "Message sent to room: {}", room.label());
                    delivered.push(room.id);
                }
                Err(e) => {
                    error!(room_id = %room_id, error = %e, "Failed to notify room");
                }
            }
        }
        delivered
    }

    async fn broadcast_to_room(
        &self,
        app_user: &ChatUser,
        room_id: &RoomId,
        text: &str,
    ) -> Result<ChatRoom, LicenseAlertError> {
        let messaging = self.ctx.messaging.as_ref();

        let room = messaging
            .room_by_id(room_id)
            .await
            .map_err(LicenseAlertError::Messaging)?
            .ok_or_else(|| LicenseAlertError::RoomNotFound {
                room_id: room_id.to_string(),
            })?;

        if let Err(e) = messaging.add_room_member(&room.id, app_user).await {
            warn!(
                room_id = %room.id,
                error = %e,
                "App user may already be in room or cannot be added"
            );
        }

        messaging
            .send_message(ChatMessage::new(&room, app_user, text))
            .await
            .map_err(LicenseAlertError::Messaging)?;

        Ok(room)
    }

    async fn notify_endpoint(
        &self,
        url: Option<&str>,
        workspace_url: &str,
        usage: &LicenseUsage,
    ) -> bool {
        let Some(url) = url else {
            info!("Endpoint notification enabled without a URL, skipping");
            return false;
        };

        info!(url = %url, "Notifying endpoint");

        let payload = WebhookPayload::new(workspace_url, usage);
        match post_alert(self.ctx.http.as_ref(), url, &payload).await {
            Ok(()) => true,
            Err(e) => {
                error!(url = %url, error = %e, "Endpoint notification failed");
                false
            }
        }
    }
}
