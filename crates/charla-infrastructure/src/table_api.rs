//! TableApiClient - REST client for the document-table store.
//!
//! The store exposes partition/sort-keyed tables with put-item and query
//! operations. Per-key atomicity is the store's guarantee; this client
//! does no locking or retries of its own.

use charla_core::error::{CharlaError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const SERVICE: &str = "table-store";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the table store's HTTP API.
#[derive(Clone)]
pub struct TableApiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl TableApiClient {
    /// Creates a new client for the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Adds an API key sent as a bearer token with every request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Writes one item into `table`.
    pub async fn put_item(&self, table: &str, item: &Value) -> Result<()> {
        let url = format!("{}/tables/{}/items", self.base_url.trim_end_matches('/'), table);
        let response = self
            .request(self.client.post(&url).json(item))
            .send()
            .await
            .map_err(|err| CharlaError::data_access(format!("{SERVICE}: put failed: {err}")))?;

        if !response.status().is_success() {
            return Err(CharlaError::data_access(format!(
                "{SERVICE}: put to {table} returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Queries `table` for items under one partition key, newest-first
    /// when `descending` is set, up to `limit` items.
    pub async fn query(
        &self,
        table: &str,
        partition_key: &str,
        limit: usize,
        descending: bool,
    ) -> Result<Vec<Value>> {
        let url = format!("{}/tables/{}/query", self.base_url.trim_end_matches('/'), table);
        let body = QueryRequest {
            partition_key,
            limit,
            scan_forward: !descending,
        };

        let response = self
            .request(self.client.post(&url).json(&body))
            .send()
            .await
            .map_err(|err| CharlaError::data_access(format!("{SERVICE}: query failed: {err}")))?;

        if !response.status().is_success() {
            return Err(CharlaError::data_access(format!(
                "{SERVICE}: query on {table} returned {}",
                response.status()
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|err| CharlaError::data_access(format!("{SERVICE}: invalid response: {err}")))?;
        Ok(parsed.items)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    partition_key: &'a str,
    limit: usize,
    scan_forward: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    items: Vec<Value>,
}
