//! `polydle-store` — reqwest clients for the two managed backends plus the
//! local dataset readers.
//!
//! Two stores are supported:
//!
//! | Store      | Surface                              | Client             |
//! |------------|--------------------------------------|--------------------|
//! | document   | Firestore-style REST (collections)   | [`DocumentClient`] |
//! | relational | PostgREST-style REST (tables)        | [`RelationalClient`] |
//!
//! Both clients are thin: one method per wire operation, JSON in and out,
//! no retries. Batch commands layer their semantics on top.

pub mod dataset;
pub mod document;
pub mod error;
pub mod relational;
pub mod value;

pub use document::DocumentClient;
pub use error::{Result, StoreError};
pub use relational::RelationalClient;

/// Turn a non-2xx response into [`StoreError::Api`] with the body attached.
pub(crate) async fn error_for_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(StoreError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp)
}
