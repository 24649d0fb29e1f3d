//! Alert message text.

use crate::license::LicenseUsage;

/// Formats the alert sent to users and rooms.
pub fn alert_text(workspace_url: &str, usage: &LicenseUsage) -> String {
    format!(
        "🚨 *Alert*: Approaching max users on license!\n\n\
         *Workspace URL:* {workspace_url}\n\
         *Max Users:* {}\n\
         *Active Users:* {}\n\
         *Usage:* {}%",
        usage.max_users, usage.active_users, usage.percentage_used
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text() {
        let usage = LicenseUsage::from_counts(100, 85).expect("usage");
        assert_eq!(
            alert_text("https://chat.example.com", &usage),
            "🚨 *Alert*: Approaching max users on license!\n\n\
             *Workspace URL:* https://chat.example.com\n\
             *Max Users:* 100\n\
             *Active Users:* 85\n\
             *Usage:* 85%"
        );
    }
}
