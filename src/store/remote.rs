use super::{RecordStore, StoreError, StoreResult};
use crate::models::ChartRecord;
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub api_key: String,
    pub table: String,
    pub timeout: Duration,
}

/// Thin client for a hosted PostgREST table with `email`, `values` and
/// `updated_at` columns and a unique constraint on `email`.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RemoteStore {
    pub fn new(config: RemoteConfig) -> StoreResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let endpoint = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key,
        })
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

#[async_trait]
impl RecordStore for RemoteStore {
    async fn find_by_key(&self, key: &str) -> StoreResult<Option<ChartRecord>> {
        let response = self
            .request(reqwest::Method::GET)
            .query(&[("select", "*".to_string()), ("email", format!("eq.{key}"))])
            .send()
            .await?;
        let response = ensure_success(response).await?;

        let mut rows: Vec<ChartRecord> = response.json().await?;
        debug!(rows = rows.len(), "remote lookup returned");
        Ok(rows.pop())
    }

    async fn upsert(&self, record: ChartRecord) -> StoreResult<()> {
        let response = self
            .request(reqwest::Method::POST)
            .query(&[("on_conflict", "email")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[record])
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}
