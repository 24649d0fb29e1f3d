//! Default implementations of plugin service traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use seatwatch_core::config::HttpConfig;
use seatwatch_core::error::{AppError, ErrorKind};
use seatwatch_core::result::AppResult;

use super::context::PluginHttpService;
use super::http::{HttpRequest, HttpResponse};

/// Plugin HTTP service backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpService {
    client: reqwest::Client,
}

impl ReqwestHttpService {
    /// Builds the client from the HTTP configuration.
    pub fn new(config: &HttpConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());

        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.connect_timeout_seconds {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })?;

        Ok(Self { client })
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        request: HttpRequest,
    ) -> Result<HttpResponse, String> {
        let mut builder = self.client.request(method.clone(), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(ref data) = request.data {
            builder = builder.json(data);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| format!("{method} {url} failed: {e}"))?;

        let status = response.status().as_u16();
        let content = response
            .text()
            .await
            .map_err(|e| format!("Reading response from {url} failed: {e}"))?;

        debug!(method = %method, url = %url, status, "HTTP request completed");

        Ok(HttpResponse::from_content(status, content))
    }
}

#[async_trait]
impl PluginHttpService for ReqwestHttpService {
    async fn get(&self, url: &str, request: HttpRequest) -> Result<HttpResponse, String> {
        self.send(Method::GET, url, request).await
    }

    async fn post(&self, url: &str, request: HttpRequest) -> Result<HttpResponse, String> {
        self.send(Method::POST, url, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_timeouts() {
        let config = HttpConfig {
            timeout_seconds: Some(10),
            connect_timeout_seconds: Some(5),
            ..HttpConfig::default()
        };
        assert!(ReqwestHttpService::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_transport_error_is_reported() {
        let service = ReqwestHttpService::new(&HttpConfig::default()).expect("client");
        let result = service
            .get("http://127.0.0.1:1/api/v1/licenses.maxActiveUsers", HttpRequest::new())
            .await;
        assert!(result.is_err());
    }
}
