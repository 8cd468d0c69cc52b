use crate::core::JsonSource;
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

/// `JsonSource` backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestSource {
    client: Client,
}

impl ReqwestSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonSource for ReqwestSource {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/services/")
                .header("accept", "application/json");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"id": 1}]));
        });

        let source = ReqwestSource::new();
        let value = source.get_json(&server.url("/api/services/")).await.unwrap();

        api_mock.assert();
        assert_eq!(value, serde_json::json!([{"id": 1}]));
    }

    #[tokio::test]
    async fn test_get_json_non_success_status() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/hero/");
            then.status(404);
        });

        let source = ReqwestSource::new();
        let result = source.get_json(&server.url("/api/hero/")).await;

        api_mock.assert();
        assert!(matches!(result, Err(CatalogError::HttpStatus { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_get_json_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/hero/");
            then.status(200).body("<html>oops</html>");
        });

        let source = ReqwestSource::new();
        let result = source.get_json(&server.url("/api/hero/")).await;

        assert!(matches!(result, Err(CatalogError::SerializationError(_))));
    }

    #[tokio::test]
    async fn test_get_json_relative_url_fails() {
        let source = ReqwestSource::new();
        let result = source.get_json("/api/services/").await;
        assert!(matches!(result, Err(CatalogError::ApiError(_))));
    }
}
