use chrono::Utc;
use tracing::info;

use polydle_core::PolydleConfig;
use polydle_rotation::{
    DocumentScheduleStore, RelationalScheduleStore, RotationError, RotationReport, Rotator,
    SnippetPolicy,
};
use polydle_store::{DocumentClient, RelationalClient};

use crate::Target;

/// Run one Purge + Populate pass for the rolling answer window.
pub async fn rotate(
    config: &PolydleConfig,
    days: Option<u32>,
    policy: Option<String>,
    target: Target,
) -> anyhow::Result<()> {
    let window_days = days.unwrap_or(config.rotation.window_days);
    let policy = resolve_policy(policy.as_deref().unwrap_or(&config.rotation.policy))?;

    let today = Utc::now().date_naive();
    let mut rng = rand::thread_rng();
    info!(%today, window_days, %policy, ?target, "starting rotation");

    let report: RotationReport = match target {
        Target::Relational => {
            let client = RelationalClient::new(&config.relational);
            let store =
                RelationalScheduleStore::new(client, config.rotation.answer_table.as_str());
            Rotator::new(store, window_days, policy)
                .rotate(today, &mut rng)
                .await?
        }
        Target::Document => {
            let client = DocumentClient::new(&config.document);
            let store = DocumentScheduleStore::new(
                client,
                config.rotation.answer_collection.as_str(),
                &config.data.dir,
            );
            Rotator::new(store, window_days, policy)
                .rotate(today, &mut rng)
                .await?
        }
    };

    for date in &report.skipped {
        info!(%date, "date left unassigned");
    }
    info!(
        purged = report.purged,
        written = report.written,
        skipped = report.skipped.len(),
        "rotation finished"
    );
    Ok(())
}

/// Parse a policy name, reporting the raw input on failure.
fn resolve_policy(name: &str) -> Result<SnippetPolicy, RotationError> {
    name.parse()
        .map_err(|_| RotationError::InvalidPolicy(name.to_string()))
}
