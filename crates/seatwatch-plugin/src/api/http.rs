//! Request and response types for the plugin HTTP service.

use serde::{Deserialize, Serialize};

/// An outbound HTTP request, minus the method and URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpRequest {
    /// Request headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub data: Option<serde_json::Value>,
}

impl HttpRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Sets the JSON body.
    pub fn json(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns the first header value matching `name`, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A received HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpResponse {
    /// Status code.
    pub status_code: u16,
    /// Raw response body.
    pub content: String,
    /// Body parsed as JSON, when it is valid JSON.
    pub data: Option<serde_json::Value>,
}

impl HttpResponse {
    /// Builds a response from a status and raw body, parsing JSON when possible.
    pub fn from_content(status_code: u16, content: String) -> Self {
        let data = serde_json::from_str(&content).ok();
        Self {
            status_code,
            content,
            data,
        }
    }

    /// Whether the status code is exactly 200.
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_content_parses_json() {
        let response = HttpResponse::from_content(200, r#"{"activeUsers":3}"#.to_string());
        assert!(response.is_ok());
        assert_eq!(response.data, Some(serde_json::json!({"activeUsers": 3})));
    }

    #[test]
    fn test_from_content_keeps_plain_text() {
        let response = HttpResponse::from_content(502, "Bad Gateway".to_string());
        assert!(!response.is_ok());
        assert!(response.data.is_none());
        assert_eq!(response.content, "Bad Gateway");
    }

    #[test]
    fn test_header_lookup_ignores_case() {
        let request = HttpRequest::new().header("X-Auth-Token", "secret");
        assert_eq!(request.header_value("x-auth-token"), Some("secret"));
        assert_eq!(request.header_value("x-user-id"), None);
    }
}
