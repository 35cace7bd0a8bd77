//! The store seam for the generator, plus the two shipping backends.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::Rng;
use tracing::{info, warn};

use polydle_core::{DailyAnswer, Language, Snippet};
use polydle_store::{dataset, DocumentClient, RelationalClient, StoreError};

use crate::error::{Result, RotationError};
use crate::generator::{plan, SnippetPolicy};

/// Relational table holding the language reference data.
const LANGUAGE_TABLE: &str = "language";
/// Relational table holding the snippet reference data.
const SNIPPET_TABLE: &str = "snippet";

/// Everything the generator needs from a backend.
///
/// Injected into [`Rotator`] so the rotation logic tests against an
/// in-memory fake instead of a live service.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// All candidate languages.
    async fn languages(&self) -> Result<Vec<Language>>;

    /// All candidate snippets.
    async fn snippets(&self) -> Result<Vec<Snippet>>;

    /// Delete every answer dated strictly after `today`. Returns how many
    /// records were removed.
    async fn purge_after(&self, today: NaiveDate) -> Result<u64>;

    /// Write the batch, replacing any existing record with the same date.
    async fn upsert(&self, batch: &[DailyAnswer]) -> Result<()>;
}

/// Summary of one rotation run.
#[derive(Debug, Clone)]
pub struct RotationReport {
    /// Future-dated records removed by the purge.
    pub purged: u64,
    /// Answers written in this run.
    pub written: usize,
    /// Dates left without an answer (empty snippet pool).
    pub skipped: Vec<NaiveDate>,
}

/// Orchestrates one Purge + Populate pass against a [`ScheduleStore`].
pub struct Rotator<S> {
    store: S,
    window_days: u32,
    policy: SnippetPolicy,
}

impl<S: ScheduleStore> Rotator<S> {
    pub fn new(store: S, window_days: u32, policy: SnippetPolicy) -> Self {
        Self {
            store,
            window_days,
            policy,
        }
    }

    /// Run one rotation for the window `(today, today + window_days]`.
    ///
    /// Reference data is validated before the purge, so a run that cannot
    /// produce a full schedule mutates nothing. Records dated `<= today`
    /// are never touched.
    pub async fn rotate<R: Rng>(&self, today: NaiveDate, rng: &mut R) -> Result<RotationReport> {
        let languages = self.store.languages().await?;
        if languages.is_empty() {
            return Err(RotationError::NoLanguages);
        }
        let snippets = self.store.snippets().await?;
        if snippets.is_empty() {
            return Err(RotationError::NoSnippets);
        }
        info!(
            languages = languages.len(),
            snippets = snippets.len(),
            "reference data loaded"
        );

        let purged = self.store.purge_after(today).await?;
        info!(purged, %today, "purged future answers");

        let plan = plan(
            &languages,
            &snippets,
            today,
            self.window_days,
            self.policy,
            rng,
        );
        if !plan.skipped.is_empty() {
            warn!(skipped = plan.skipped.len(), "some dates were left unassigned");
        }

        if !plan.answers.is_empty() {
            self.store.upsert(&plan.answers).await?;
        }
        info!(
            written = plan.answers.len(),
            window_days = self.window_days,
            policy = %self.policy,
            "rotation complete"
        );

        Ok(RotationReport {
            purged,
            written: plan.answers.len(),
            skipped: plan.skipped,
        })
    }
}

/// Backend over the relational store: reference tables + `answer` table.
pub struct RelationalScheduleStore {
    client: RelationalClient,
    answer_table: String,
}

impl RelationalScheduleStore {
    pub fn new(client: RelationalClient, answer_table: impl Into<String>) -> Self {
        Self {
            client,
            answer_table: answer_table.into(),
        }
    }
}

#[async_trait]
impl ScheduleStore for RelationalScheduleStore {
    async fn languages(&self) -> Result<Vec<Language>> {
        Ok(self.client.select(LANGUAGE_TABLE, "*").await?)
    }

    async fn snippets(&self) -> Result<Vec<Snippet>> {
        Ok(self.client.select(SNIPPET_TABLE, "*").await?)
    }

    async fn purge_after(&self, today: NaiveDate) -> Result<u64> {
        Ok(self
            .client
            .delete_gt(&self.answer_table, "date", &today.to_string())
            .await?)
    }

    async fn upsert(&self, batch: &[DailyAnswer]) -> Result<()> {
        Ok(self.client.upsert(&self.answer_table, batch, "date").await?)
    }
}

/// Backend over the document store: answers live in one collection keyed by
/// `YYYY-MM-DD` document ids; reference data comes from the local datasets.
pub struct DocumentScheduleStore {
    client: DocumentClient,
    collection: String,
    data_dir: PathBuf,
}

impl DocumentScheduleStore {
    pub fn new(
        client: DocumentClient,
        collection: impl Into<String>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            collection: collection.into(),
            data_dir: data_dir.into(),
        }
    }
}

#[async_trait]
impl ScheduleStore for DocumentScheduleStore {
    async fn languages(&self) -> Result<Vec<Language>> {
        Ok(dataset::load_languages(&self.data_dir.join("languages.json"))?)
    }

    async fn snippets(&self) -> Result<Vec<Snippet>> {
        Ok(dataset::load_snippets(&self.data_dir.join("snippets.json"))?)
    }

    async fn purge_after(&self, today: NaiveDate) -> Result<u64> {
        let docs = self.client.list_documents(&self.collection).await?;
        let mut purged = 0;

        for (id, _) in docs {
            // ids that aren't dates (markers, test docs) are left alone
            let Some(date) = parse_date_id(&id) else {
                continue;
            };
            if date > today {
                self.client.delete_document(&self.collection, &id).await?;
                purged += 1;
            }
        }

        Ok(purged)
    }

    async fn upsert(&self, batch: &[DailyAnswer]) -> Result<()> {
        for answer in batch {
            let body = serde_json::to_value(answer).map_err(StoreError::Json)?;
            self.client
                .set_document(&self.collection, &answer.date.to_string(), &body)
                .await?;
        }
        Ok(())
    }
}

/// Parse a document id as a `YYYY-MM-DD` date.
fn parse_date_id(id: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(id, "%Y-%m-%d").ok()
}
