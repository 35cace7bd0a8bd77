use thiserror::Error;

/// Errors from store clients and dataset readers.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport-level failure (DNS, TLS, connect, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("Store API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response arrived but did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// A local dataset file is malformed.
    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
