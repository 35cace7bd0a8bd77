use tracing::info;

use polydle_core::PolydleConfig;
use polydle_store::DocumentClient;

/// Copy every document from `source` into `destination`, keeping ids.
///
/// Existing documents in `destination` with the same id are overwritten.
/// Documents pass through the JSON value codec, which has no JSON form for
/// timestamp and reference fields — those land in `destination` as plain
/// strings. The reference datasets don't use either type.
pub async fn copy_collection(
    config: &PolydleConfig,
    source: &str,
    destination: &str,
) -> anyhow::Result<()> {
    let client = DocumentClient::new(&config.document);

    let docs = client.list_documents(source).await?;
    let mut copied = 0;
    for (id, body) in docs {
        client.set_document(destination, &id, &body).await?;
        info!(%id, "copied document");
        copied += 1;
    }

    info!(copied, source, destination, "collection copy complete");
    Ok(())
}
