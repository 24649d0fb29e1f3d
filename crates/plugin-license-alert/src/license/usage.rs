//! Seat usage fetched from `/api/v1/licenses.maxActiveUsers`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use seatwatch_plugin::api::context::PluginHttpService;
use seatwatch_plugin::api::http::HttpRequest;

use crate::error::LicenseAlertError;

/// Path of the usage endpoint, relative to the workspace URL.
pub const USAGE_PATH: &str = "/api/v1/licenses.maxActiveUsers";

/// Seat usage at the moment of the check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseUsage {
    /// Seats the license allows.
    pub max_users: u64,
    /// Seats currently in use.
    pub active_users: u64,
    /// `floor(active_users / max_users * 100)`.
    pub percentage_used: u64,
}

impl LicenseUsage {
    /// Computes usage from raw counts.
    ///
    /// Returns `None` when `max_users` is zero, since no percentage exists.
    pub fn from_counts(max_users: u64, active_users: u64) -> Option<Self> {
        if max_users == 0 {
            return None;
        }
        let percentage_used = active_users.checked_mul(100)? / max_users;
        Some(Self {
            max_users,
            active_users,
            percentage_used,
        })
    }

    /// Whether usage is at or above `threshold` percent.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.percentage_used as f64 >= threshold
    }
}

/// Credentials and base URL for the workspace API.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceCredentials {
    /// Workspace base URL, as configured.
    pub url: String,
    /// Value of the `x-user-id` header.
    pub user_id: String,
    /// Value of the `x-auth-token` header.
    pub auth_token: String,
}

impl WorkspaceCredentials {
    /// Full URL of the usage endpoint.
    pub fn usage_url(&self) -> String {
        format!("{}{}", self.url, USAGE_PATH)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageResponse {
    #[serde(default)]
    max_active_users: Option<f64>,
    #[serde(default)]
    active_users: Option<f64>,
}

/// A seat count from any JSON number, so `85` and `85.0` read the same.
///
/// Fractional, negative, and non-finite values are not counts.
fn seat_count(value: f64) -> Option<u64> {
    let whole = value.is_finite() && value >= 0.0 && value.fract() == 0.0;
    (whole && value < u64::MAX as f64).then_some(value as u64)
}

/// Fetches current seat usage.
pub async fn fetch_usage(
    http: &dyn PluginHttpService,
    credentials: &WorkspaceCredentials,
) -> Result<LicenseUsage, LicenseAlertError> {
    let url = credentials.usage_url();
    let request = HttpRequest::new()
        .header("accept", "*/*")
        .header("x-auth-token", &credentials.auth_token)
        .header("x-user-id", &credentials.user_id)
        .header("content-type", "application/json");

    debug!(url = %url, "Fetching license usage");

    let response = http
        .get(&url, request)
        .await
        .map_err(LicenseAlertError::UsageRequest)?;

    if !response.is_ok() {
        return Err(LicenseAlertError::UsageStatus {
            status: response.status_code,
            body: response.content,
        });
    }

    let data = response
        .data
        .ok_or_else(|| LicenseAlertError::MalformedUsage("response body is not JSON".to_string()))?;

    let parsed: UsageResponse = serde_json::from_value(data)
        .map_err(|e| LicenseAlertError::MalformedUsage(e.to_string()))?;

    let (Some(max_raw), Some(active_raw)) = (parsed.max_active_users, parsed.active_users) else {
        return Err(LicenseAlertError::MalformedUsage(
            "maxActiveUsers or activeUsers missing".to_string(),
        ));
    };

    let (Some(max_users), Some(active_users)) = (seat_count(max_raw), seat_count(active_raw))
    else {
        return Err(LicenseAlertError::MalformedUsage(format!(
            "seat counts must be whole numbers, got {} active of {} max users",
            active_raw, max_raw
        )));
    };

    let usage = LicenseUsage::from_counts(max_users, active_users).ok_or_else(|| {
        LicenseAlertError::MalformedUsage(format!(
            "cannot compute usage from {} active of {} max users",
            active_users, max_users
        ))
    })?;

    info!("Max Active Users: {}", usage.max_users);
    info!("Current Active Users: {}", usage.active_users);
    info!("Percentage of Max Users Used: {}%", usage.percentage_used);

    Ok(usage)
}
