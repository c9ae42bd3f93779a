//! Hosted backend store speaking the PostgREST dialect
//!
//! Tables live under `{base_url}/rest/v1/{table}`; filters are query pairs of
//! the form `column=eq.value`. When a project key is configured every request
//! carries it both as `apikey` and as a bearer token.

use super::{require_filters, Filter, StoreError, StoreResult, WardrobeStore};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("p3510-wardrobe/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct RestStore {
    http_client: reqwest::Client,
    base_url: String,
}

/// `apikey` and bearer headers for `api_key`; none for an anonymous client
fn auth_headers(api_key: Option<&str>) -> StoreResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    let Some(key) = api_key.filter(|k| !k.is_empty()) else {
        return Ok(headers);
    };

    let header = |value: String| {
        HeaderValue::from_str(&value).map_err(|e| StoreError::Config(format!("API key: {}", e)))
    };
    headers.insert("apikey", header(key.to_string())?);
    headers.insert(AUTHORIZATION, header(format!("Bearer {}", key))?);
    Ok(headers)
}

impl RestStore {
    pub fn new(base_url: &str, api_key: Option<&str>) -> StoreResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .default_headers(auth_headers(api_key)?)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Attach filters and ordering as query pairs
    fn scoped(request: RequestBuilder, filters: &[Filter], order: Option<&str>) -> RequestBuilder {
        let mut pairs: Vec<(String, String)> = filters
            .iter()
            .map(|f| (f.column.to_string(), format!("eq.{}", f.value)))
            .collect();
        if let Some(column) = order {
            pairs.push(("order".to_string(), format!("{}.asc", column)));
        }
        request.query(&pairs)
    }

    /// Rows of a successful response; any other status becomes `StoreError::Api`
    async fn rows(response: Response) -> StoreResult<Vec<Value>> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&text).map_err(|e| StoreError::Parse(format!("{}: {}", e, text)))
    }
}

#[async_trait]
impl WardrobeStore for RestStore {
    async fn select(
        &self,
        table: &'static str,
        filters: &[Filter],
        order: Option<&'static str>,
    ) -> StoreResult<Vec<Value>> {
        debug!(table, filters = filters.len(), "Selecting rows");
        let request = Self::scoped(self.http_client.get(self.table_url(table)), filters, order);
        Self::rows(request.send().await?).await
    }

    async fn insert(&self, table: &'static str, row: Value) -> StoreResult<Value> {
        debug!(table, "Inserting row");
        let response = self
            .http_client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()
            .await?;

        Self::rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Parse(format!("{} insert returned no row", table)))
    }

    async fn update(&self, table: &'static str, id: &str, changes: Value) -> StoreResult<()> {
        debug!(table, id, "Updating row");
        let request = self
            .http_client
            .patch(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&changes);
        let request = Self::scoped(request, &[super::eq("id", id)], None);

        if Self::rows(request.send().await?).await?.is_empty() {
            return Err(StoreError::NotFound(format!("{} {}", table, id)));
        }
        Ok(())
    }

    async fn delete(&self, table: &'static str, filters: &[Filter]) -> StoreResult<usize> {
        require_filters(table, filters)?;

        debug!(table, filters = filters.len(), "Deleting rows");
        let request = self
            .http_client
            .delete(self.table_url(table))
            .header("Prefer", "return=representation");
        let request = Self::scoped(request, filters, None);

        Ok(Self::rows(request.send().await?).await?.len())
    }
}
