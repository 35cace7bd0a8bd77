//! PostgREST-style relational store client.
//!
//! One method per wire operation: select, insert, upsert, filtered delete.
//! The service-role key is sent as both `apikey` and bearer token, the way
//! the hosted service expects it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use polydle_core::config::RelationalConfig;

use crate::error::{Result, StoreError};
use crate::error_for_status;

pub struct RelationalClient {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl RelationalClient {
    pub fn new(config: &RelationalConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.service_role_key.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.key)
            .header("Authorization", format!("Bearer {}", self.key))
    }

    /// `GET /rest/v1/{table}?select={columns}` — rows deserialized into `T`.
    pub async fn select<T: DeserializeOwned>(&self, table: &str, columns: &str) -> Result<Vec<T>> {
        let builder = self
            .client
            .get(self.table_url(table))
            .query(&[("select", columns)]);
        let resp = error_for_status(self.apply_auth(builder).send().await?).await?;

        let rows: Vec<T> = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!(table, count = rows.len(), "selected rows");
        Ok(rows)
    }

    /// Plain insert. Returns the number of rows written.
    pub async fn insert<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<usize> {
        let builder = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(rows);
        let resp = error_for_status(self.apply_auth(builder).send().await?).await?;

        let written: Vec<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;
        debug!(table, count = written.len(), "inserted rows");
        Ok(written.len())
    }

    /// Insert-or-update keyed on `on_conflict`.
    pub async fn upsert<T: Serialize>(
        &self,
        table: &str,
        rows: &[T],
        on_conflict: &str,
    ) -> Result<()> {
        let builder = self
            .client
            .post(self.table_url(table))
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(rows);
        error_for_status(self.apply_auth(builder).send().await?).await?;

        debug!(table, count = rows.len(), on_conflict, "upserted rows");
        Ok(())
    }

    /// `DELETE /rest/v1/{table}?{column}=gt.{value}`. Returns the number of
    /// rows removed, taken from the `Content-Range` header.
    pub async fn delete_gt(&self, table: &str, column: &str, value: &str) -> Result<u64> {
        let builder = self
            .client
            .delete(self.table_url(table))
            .query(&[(column, format!("gt.{value}"))])
            .header("Prefer", "count=exact");
        let resp = error_for_status(self.apply_auth(builder).send().await?).await?;

        let deleted = resp
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .unwrap_or(0);
        debug!(table, column, value, deleted, "deleted rows");
        Ok(deleted)
    }
}

/// Extract the total from a `Content-Range` header value (`*/5`, `0-4/5`).
fn parse_content_range(header: &str) -> Option<u64> {
    header.rsplit('/').next()?.parse().ok()
}
