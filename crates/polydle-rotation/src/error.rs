use thiserror::Error;

/// Errors from the rolling-schedule generator.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The language reference table/dataset came back empty.
    #[error("no languages in the reference data")]
    NoLanguages,

    /// The snippet reference table/dataset came back empty.
    #[error("no snippets in the reference data")]
    NoSnippets,

    /// Unknown snippet policy name in the config or CLI.
    #[error("unknown snippet policy: {0}")]
    InvalidPolicy(String),

    /// Underlying store client failure.
    #[error("Store error: {0}")]
    Store(#[from] polydle_store::StoreError),
}

pub type Result<T> = std::result::Result<T, RotationError>;
