use std::path::{Path, PathBuf};

use tracing::info;

use polydle_core::PolydleConfig;
use polydle_store::{dataset, DocumentClient, RelationalClient};

use crate::Target;

/// Relational table for languages (unique on `name`).
const LANGUAGE_TABLE: &str = "language";
/// Relational table for snippets (unique on `id`).
const SNIPPET_TABLE: &str = "snippet";
/// Document collection for languages, keyed by language name.
const LANGUAGES_COLLECTION: &str = "languages";
/// Document collection for snippets, keyed by `snippet_{n}`.
const SNIPPETS_COLLECTION: &str = "codeSnippets";

fn dataset_path(config: &PolydleConfig, file: Option<PathBuf>, name: &str) -> PathBuf {
    file.unwrap_or_else(|| Path::new(&config.data.dir).join(name))
}

/// Import the language dataset into the chosen store.
pub async fn import_languages(
    config: &PolydleConfig,
    file: Option<PathBuf>,
    target: Target,
) -> anyhow::Result<()> {
    let path = dataset_path(config, file, "languages.json");
    let languages = dataset::load_languages(&path)?;
    anyhow::ensure!(
        !languages.is_empty(),
        "language dataset {} is empty",
        path.display()
    );

    match target {
        Target::Relational => {
            let client = RelationalClient::new(&config.relational);
            client.upsert(LANGUAGE_TABLE, &languages, "name").await?;
            info!(
                count = languages.len(),
                table = LANGUAGE_TABLE,
                "languages upserted"
            );
        }
        Target::Document => {
            let client = DocumentClient::new(&config.document);
            for language in &languages {
                let body = serde_json::to_value(language)?;
                client
                    .set_document(LANGUAGES_COLLECTION, &language.name, &body)
                    .await?;
                info!(name = %language.name, "language uploaded");
            }
            info!(
                count = languages.len(),
                collection = LANGUAGES_COLLECTION,
                "language upload complete"
            );
        }
    }

    Ok(())
}

/// Import the snippet dataset into the chosen store.
pub async fn import_snippets(
    config: &PolydleConfig,
    file: Option<PathBuf>,
    target: Target,
) -> anyhow::Result<()> {
    let path = dataset_path(config, file, "snippets.json");
    let snippets = dataset::load_snippets(&path)?;
    anyhow::ensure!(
        !snippets.is_empty(),
        "snippet dataset {} is empty",
        path.display()
    );

    match target {
        Target::Relational => {
            let client = RelationalClient::new(&config.relational);
            client.upsert(SNIPPET_TABLE, &snippets, "id").await?;
            info!(
                count = snippets.len(),
                table = SNIPPET_TABLE,
                "snippets upserted"
            );
        }
        Target::Document => {
            let client = DocumentClient::new(&config.document);
            for (i, snippet) in snippets.iter().enumerate() {
                let id = format!("snippet_{}", i + 1);
                let body = serde_json::to_value(snippet)?;
                client.set_document(SNIPPETS_COLLECTION, &id, &body).await?;
                info!(%id, "snippet uploaded");
            }
            info!(
                count = snippets.len(),
                collection = SNIPPETS_COLLECTION,
                "snippet upload complete"
            );
        }
    }

    Ok(())
}

/// Insert rows from the CSV snippet export into a relational table.
pub async fn import_csv(
    config: &PolydleConfig,
    file: Option<PathBuf>,
    table: &str,
) -> anyhow::Result<()> {
    let path = dataset_path(config, file, "snippets.csv");
    let snippets = dataset::load_snippets_csv(&path)?;
    anyhow::ensure!(!snippets.is_empty(), "CSV file {} has no rows", path.display());

    let client = RelationalClient::new(&config.relational);
    let inserted = client.insert(table, &snippets).await?;
    info!(inserted, table, "CSV import complete");
    Ok(())
}
