//! Alert delivery to an external HTTP endpoint.

use serde::{Deserialize, Serialize};
use tracing::info;

use seatwatch_plugin::api::context::PluginHttpService;
use seatwatch_plugin::api::http::HttpRequest;

use crate::error::LicenseAlertError;
use crate::license::LicenseUsage;

/// Value of the `alert` field in every webhook body.
pub const ALERT_SUMMARY: &str = "Approaching max users on license";

/// JSON body POSTed to the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Workspace base URL, as configured.
    pub workspace_url: String,
    /// Seats the license allows.
    pub max_users: u64,
    /// Seats currently in use.
    pub active_users: u64,
    /// Usage percentage.
    pub percentage_used: u64,
    /// Fixed alert summary.
    pub alert: String,
}

impl WebhookPayload {
    /// Builds the payload for a usage reading.
    pub fn new(workspace_url: &str, usage: &LicenseUsage) -> Self {
        Self {
            workspace_url: workspace_url.to_string(),
            max_users: usage.max_users,
            active_users: usage.active_users,
            percentage_used: usage.percentage_used,
            alert: ALERT_SUMMARY.to_string(),
        }
    }
}

/// POSTs the payload. Only a 200 response counts as delivered.
pub async fn post_alert(
    http: &dyn PluginHttpService,
    url: &str,
    payload: &WebhookPayload,
) -> Result<(), LicenseAlertError> {
    let body = serde_json::to_value(payload)
        .map_err(|e| LicenseAlertError::WebhookRequest(e.to_string()))?;

    let request = HttpRequest::new()
        .header("Content-Type", "application/json")
        .json(body);

    let response = http
        .post(url, request)
        .await
        .map_err(LicenseAlertError::WebhookRequest)?;

    if !response.is_ok() {
        return Err(LicenseAlertError::WebhookRejected {
            status: response.status_code,
            body: response.content,
        });
    }

    info!(url = %url, "Successfully notified endpoint");
    Ok(())
}
