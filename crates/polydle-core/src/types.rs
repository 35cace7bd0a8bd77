use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A programming language entry from the reference dataset.
///
/// Only `id` and `name` are interpreted by the toolkit; every other column
/// (paradigms, year, typing, icon, …) rides along in `extra` so imports are
/// lossless regardless of dataset revisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A code snippet entry from the reference dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    pub id: i64,
    /// FK to the language the snippet is written in. Older dataset exports
    /// omit it, so it stays optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_id: Option<i64>,
    pub code: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One day's answer: which language and snippet the game reveals on `date`.
///
/// `date` is the natural unique key — the stores upsert on it, and document
/// ids are its `YYYY-MM-DD` rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAnswer {
    pub date: NaiveDate,
    pub language_id: i64,
    pub snippet_id: i64,
}
