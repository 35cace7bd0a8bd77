//! Firestore-style document store client.
//!
//! Wraps the REST v1 surface: list a collection (paginated), set a document
//! by id, delete a document by id. Bodies are plain `serde_json::Value`;
//! the typed-value wrapping happens in [`crate::value`].

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use polydle_core::config::DocumentConfig;

use crate::error::{Result, StoreError};
use crate::{error_for_status, value};

/// Page size for collection listing.
const LIST_PAGE_SIZE: u32 = 300;

pub struct DocumentClient {
    client: reqwest::Client,
    base_url: String,
    /// `projects/{project}/databases/{database}/documents`
    parent: String,
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<ApiDocument>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDocument {
    /// Full resource name, e.g. `projects/p/databases/(default)/documents/languages/Rust`.
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl DocumentClient {
    pub fn new(config: &DocumentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            parent: format!(
                "projects/{}/databases/{}/documents",
                config.project_id, config.database
            ),
            access_token: config.access_token.clone(),
        }
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}/{}", self.base_url, self.parent, collection, id)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.parent, collection)
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Fetch every document in `collection` as `(document_id, body)` pairs.
    pub async fn list_documents(&self, collection: &str) -> Result<Vec<(String, Value)>> {
        let url = self.collection_url(collection);
        let mut docs = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", LIST_PAGE_SIZE.to_string())];
            if let Some(ref token) = page_token {
                query.push(("pageToken", token.clone()));
            }

            let builder = self.client.get(&url).query(&query);
            let resp = error_for_status(self.apply_auth(builder).send().await?).await?;
            let page: ListResponse = resp
                .json()
                .await
                .map_err(|e| StoreError::Decode(e.to_string()))?;

            for doc in page.documents {
                let id = document_id(&doc.name).to_string();
                docs.push((id, value::from_fields(&doc.fields)));
            }

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(collection, count = docs.len(), "listed collection");
        Ok(docs)
    }

    /// Create or fully replace the document `collection/id`.
    pub async fn set_document(&self, collection: &str, id: &str, body: &Value) -> Result<()> {
        let fields = value::to_fields(body)?;
        let url = self.document_url(collection, id);

        let builder = self
            .client
            .patch(&url)
            .json(&serde_json::json!({ "fields": fields }));
        error_for_status(self.apply_auth(builder).send().await?).await?;

        debug!(collection, id, "document set");
        Ok(())
    }

    /// Delete the document `collection/id`. Deleting a missing document is
    /// not an error on the wire, matching the store's own semantics.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let url = self.document_url(collection, id);
        let builder = self.client.delete(&url);
        error_for_status(self.apply_auth(builder).send().await?).await?;

        debug!(collection, id, "document deleted");
        Ok(())
    }
}

/// Last path segment of a full resource name.
fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
