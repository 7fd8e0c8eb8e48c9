//! Typed wrapper over the entry server's HTTP API.

use reqwest::{Response, StatusCode};
use serde_json::json;
use uuid::Uuid;

use super::ClientResult;
use crate::models::EntryView;

/// HTTP client for the entry server. Clones share one connection pool.
#[derive(Debug, Clone)]
pub struct EntryClient {
    http: reqwest::Client,
    base_url: String,
}

impl EntryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /new. The raw response is returned so callers can inspect
    /// unexpected statuses.
    pub async fn create(&self, text: &str) -> ClientResult<Response> {
        let response = self
            .http
            .post(format!("{}/new", self.base_url))
            .json(&json!({ "text": text }))
            .send()
            .await?;
        Ok(response)
    }

    /// GET /entries/:count
    pub async fn list(&self, count: u64) -> ClientResult<Vec<EntryView>> {
        let entries = self
            .http
            .get(format!("{}/entries/{count}", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(entries)
    }

    /// DELETE /:uuid
    pub async fn delete(&self, id: Uuid) -> ClientResult<StatusCode> {
        let response = self
            .http
            .delete(format!("{}/{id}", self.base_url))
            .send()
            .await?;
        Ok(response.status())
    }
}
