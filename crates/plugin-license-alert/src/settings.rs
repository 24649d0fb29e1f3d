//! Settings the license alert plugin exposes to the host.

use std::sync::LazyLock;

use serde_json::json;

use seatwatch_plugin::api::settings::{SettingDescriptor, SettingKind};

/// Base URL of the workspace whose licenses are checked.
pub const WORKSPACE_URL: &str = "workspace_url";
/// User ID sent as `x-user-id` on the usage request.
pub const WORKSPACE_USER_ID: &str = "workspace_user_id";
/// Token sent as `x-auth-token` on the usage request.
pub const WORKSPACE_AUTH_TOKEN: &str = "workspace_auth_token";
/// Usage percentage at or above which alerts go out.
pub const LICENSE_USAGE_THRESHOLD: &str = "license_usage_threshold";
/// Whether to send a direct message.
pub const NOTIFY_USER: &str = "notify_user";
/// User to direct-message.
pub const NOTIFY_USER_ID: &str = "notify_user_id";
/// Whether to broadcast to rooms.
pub const NOTIFY_ROOM: &str = "notify_room";
/// Room (or rooms) to broadcast to.
pub const NOTIFY_ROOM_ID: &str = "notify_room_id";
/// Whether to POST to an external endpoint.
pub const NOTIFY_ENDPOINT: &str = "notify_endpoint";
/// Endpoint to POST to.
pub const NOTIFY_ENDPOINT_URL: &str = "notify_endpoint_url";

/// Every setting, in the order the host should present them.
pub static CATALOG: LazyLock<Vec<SettingDescriptor>> = LazyLock::new(|| {
    vec![
        SettingDescriptor::new(WORKSPACE_URL, SettingKind::String)
            .package_value(json!("URL"))
            .required(true)
            .label("Workspace Url")
            .description("Please enter your workspace URL"),
        SettingDescriptor::new(WORKSPACE_USER_ID, SettingKind::String)
            .package_value(json!(""))
            .required(true)
            .label("Workspace User ID")
            .description("Enter the User ID for API authentication"),
        SettingDescriptor::new(WORKSPACE_AUTH_TOKEN, SettingKind::Password)
            .package_value(json!(""))
            .required(true)
            .public(false)
            .label("Workspace Auth Token")
            .description("Enter the authentication token for API requests"),
        SettingDescriptor::new(LICENSE_USAGE_THRESHOLD, SettingKind::Number)
            .package_value(json!(80))
            .required(true)
            .label("License Usage Threshold")
            .description("Enter the percentage of license used before notifying"),
        SettingDescriptor::new(NOTIFY_USER, SettingKind::Boolean)
            .package_value(json!(false))
            .required(true)
            .label("Notify User")
            .description("Enable notifications for a specific user"),
        SettingDescriptor::new(NOTIFY_USER_ID, SettingKind::String)
            .package_value(json!(""))
            .label("User ID")
            .description("Enter the user ID to notify"),
        SettingDescriptor::new(NOTIFY_ROOM, SettingKind::Boolean)
            .package_value(json!(false))
            .required(true)
            .label("Notify Room")
            .description("Enable notifications for a specific room"),
        SettingDescriptor::new(NOTIFY_ROOM_ID, SettingKind::RoomPick)
            .package_value(json!(""))
            .label("Room ID")
            .description("Enter the room ID to notify"),
        SettingDescriptor::new(NOTIFY_ENDPOINT, SettingKind::Boolean)
            .package_value(json!(false))
            .required(true)
            .label("Notify Endpoint")
            .description("Enable notifications for an external endpoint"),
        SettingDescriptor::new(NOTIFY_ENDPOINT_URL, SettingKind::String)
            .package_value(json!(""))
            .label("Endpoint URL")
            .description("Enter the URL endpoint to notify"),
    ]
});
