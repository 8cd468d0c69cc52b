use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Fetch-like transport: one GET, JSON body on success.
#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value>;
}

#[async_trait]
impl<T: JsonSource + ?Sized> JsonSource for Arc<T> {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        (**self).get_json(url).await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn hero_origin(&self) -> &str;
    fn hero_endpoint(&self) -> String;
    fn services_endpoint(&self) -> String;
}
