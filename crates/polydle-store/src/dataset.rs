//! Local reference-dataset readers: `languages.json`, `snippets.json`, and
//! the legacy `snippets.csv` export.

use std::path::Path;

use serde::Deserialize;
use serde_json::json;

use polydle_core::{Language, Snippet};

use crate::error::{Result, StoreError};

/// Load the language dataset from a JSON array file.
pub fn load_languages(path: &Path) -> Result<Vec<Language>> {
    let raw = std::fs::read_to_string(path)?;
    let languages: Vec<Language> = serde_json::from_str(&raw)
        .map_err(|e| StoreError::Dataset(format!("{}: {e}", path.display())))?;
    Ok(languages)
}

/// Load the snippet dataset from a JSON array file.
pub fn load_snippets(path: &Path) -> Result<Vec<Snippet>> {
    let raw = std::fs::read_to_string(path)?;
    let snippets: Vec<Snippet> = serde_json::from_str(&raw)
        .map_err(|e| StoreError::Dataset(format!("{}: {e}", path.display())))?;
    Ok(snippets)
}

/// One row of the CSV export: `id,language_id,code,description,link`.
#[derive(Debug, Deserialize)]
struct SnippetRow {
    id: i64,
    language_id: i64,
    code: String,
    description: String,
    link: String,
}

/// Load snippets from the CSV export.
///
/// The export stores code as a single CSV field with literal `\n` / `\t`
/// sequences; they are expanded to real newlines and tabs here so the rows
/// land in the store with their original formatting.
pub fn load_snippets_csv(path: &Path) -> Result<Vec<Snippet>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut snippets = Vec::new();

    for record in reader.deserialize() {
        let row: SnippetRow = record?;
        let mut extra = serde_json::Map::new();
        extra.insert("description".to_string(), json!(row.description));
        extra.insert("link".to_string(), json!(row.link));

        snippets.push(Snippet {
            id: row.id,
            language_id: Some(row.language_id),
            code: expand_escapes(&row.code),
            extra,
        });
    }

    Ok(snippets)
}

/// Expand literal `\n` and `\t` sequences into newline and tab characters.
pub fn expand_escapes(raw: &str) -> String {
    raw.replace("\\n", "\n").replace("\\t", "\t")
}
