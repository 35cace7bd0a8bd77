// End-to-end rotation behavior against an in-memory store: window shape,
// purge boundaries, idempotent re-runs, and empty-reference aborts.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use polydle_core::{DailyAnswer, Language, Snippet};
use polydle_rotation::{RotationError, Rotator, ScheduleStore, SnippetPolicy};

struct MemoryScheduleStore {
    languages: Vec<Language>,
    snippets: Vec<Snippet>,
    answers: Mutex<BTreeMap<NaiveDate, DailyAnswer>>,
}

impl MemoryScheduleStore {
    fn new(languages: Vec<Language>, snippets: Vec<Snippet>) -> Self {
        Self {
            languages,
            snippets,
            answers: Mutex::new(BTreeMap::new()),
        }
    }

    fn preload(&self, answer: DailyAnswer) {
        self.answers.lock().unwrap().insert(answer.date, answer);
    }

    fn dates(&self) -> Vec<NaiveDate> {
        self.answers.lock().unwrap().keys().copied().collect()
    }

    fn get(&self, date: NaiveDate) -> Option<DailyAnswer> {
        self.answers.lock().unwrap().get(&date).cloned()
    }

    fn len(&self) -> usize {
        self.answers.lock().unwrap().len()
    }
}

#[async_trait]
impl ScheduleStore for &MemoryScheduleStore {
    async fn languages(&self) -> polydle_rotation::Result<Vec<Language>> {
        Ok(self.languages.clone())
    }

    async fn snippets(&self) -> polydle_rotation::Result<Vec<Snippet>> {
        Ok(self.snippets.clone())
    }

    async fn purge_after(&self, today: NaiveDate) -> polydle_rotation::Result<u64> {
        let mut answers = self.answers.lock().unwrap();
        let before = answers.len();
        answers.retain(|date, _| *date <= today);
        Ok((before - answers.len()) as u64)
    }

    async fn upsert(&self, batch: &[DailyAnswer]) -> polydle_rotation::Result<()> {
        let mut answers = self.answers.lock().unwrap();
        for answer in batch {
            answers.insert(answer.date, answer.clone());
        }
        Ok(())
    }
}

fn language(id: i64, name: &str) -> Language {
    Language {
        id,
        name: name.to_string(),
        extra: serde_json::Map::new(),
    }
}

fn snippet(id: i64, language_id: i64) -> Snippet {
    Snippet {
        id,
        language_id: Some(language_id),
        code: format!("// {id}"),
        extra: serde_json::Map::new(),
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn answer(date: NaiveDate) -> DailyAnswer {
    DailyAnswer {
        date,
        language_id: 999,
        snippet_id: 999,
    }
}

fn reference_store() -> MemoryScheduleStore {
    MemoryScheduleStore::new(
        vec![language(1, "Rust"), language(2, "Go")],
        vec![snippet(10, 1), snippet(11, 1), snippet(20, 2)],
    )
}

#[tokio::test]
async fn rotation_fills_the_whole_window() {
    let store = reference_store();
    let rotator = Rotator::new(&store, 30, SnippetPolicy::AnyLanguage);
    let today = day(2024, 1, 1);

    let report = rotator
        .rotate(today, &mut StdRng::seed_from_u64(1))
        .await
        .unwrap();

    assert_eq!(report.written, 30);
    assert!(report.skipped.is_empty());
    assert_eq!(store.len(), 30);

    let dates = store.dates();
    assert_eq!(dates.first(), Some(&day(2024, 1, 2)));
    assert_eq!(dates.last(), Some(&day(2024, 1, 31)));
}

#[tokio::test]
async fn past_and_present_answers_are_never_touched() {
    let store = reference_store();
    let today = day(2024, 6, 15);

    let past = answer(day(2024, 6, 1));
    let present = answer(today);
    let future = answer(day(2024, 6, 20));
    store.preload(past.clone());
    store.preload(present.clone());
    store.preload(future);

    let rotator = Rotator::new(&store, 30, SnippetPolicy::AnyLanguage);
    let report = rotator
        .rotate(today, &mut StdRng::seed_from_u64(2))
        .await
        .unwrap();

    assert_eq!(report.purged, 1);
    // historical records survive byte for byte
    assert_eq!(store.get(past.date), Some(past));
    assert_eq!(store.get(present.date), Some(present));
    // the stale future pick was replaced by a fresh one
    let replaced = store.get(day(2024, 6, 20)).unwrap();
    assert_ne!(replaced.language_id, 999);
}

#[tokio::test]
async fn rerunning_keeps_date_keys_unique() {
    let store = reference_store();
    let today = day(2024, 3, 10);
    let rotator = Rotator::new(&store, 30, SnippetPolicy::AnyLanguage);

    rotator
        .rotate(today, &mut StdRng::seed_from_u64(3))
        .await
        .unwrap();
    rotator
        .rotate(today, &mut StdRng::seed_from_u64(4))
        .await
        .unwrap();

    // second run purged the first run's window and rewrote it in place
    assert_eq!(store.len(), 30);
    let dates = store.dates();
    assert_eq!(dates.first(), Some(&day(2024, 3, 11)));
    assert_eq!(dates.last(), Some(&day(2024, 4, 9)));
}

#[tokio::test]
async fn empty_languages_abort_before_any_write() {
    let store = MemoryScheduleStore::new(vec![], vec![snippet(10, 1)]);
    let future = answer(day(2024, 1, 20));
    store.preload(future.clone());

    let rotator = Rotator::new(&store, 30, SnippetPolicy::AnyLanguage);
    let err = rotator
        .rotate(day(2024, 1, 1), &mut StdRng::seed_from_u64(5))
        .await
        .unwrap_err();

    assert!(matches!(err, RotationError::NoLanguages));
    // the purge never ran: the stale future record is still there
    assert_eq!(store.get(future.date), Some(future));
}

#[tokio::test]
async fn empty_snippets_abort_before_any_write() {
    let store = MemoryScheduleStore::new(vec![language(1, "Rust")], vec![]);
    let future = answer(day(2024, 1, 20));
    store.preload(future.clone());

    let rotator = Rotator::new(&store, 30, SnippetPolicy::AnyLanguage);
    let err = rotator
        .rotate(day(2024, 1, 1), &mut StdRng::seed_from_u64(6))
        .await
        .unwrap_err();

    assert!(matches!(err, RotationError::NoSnippets));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn match_policy_skips_dates_without_a_pool() {
    // the only language has no snippets of its own; the pool is never empty
    // globally, so the run proceeds and skips every date
    let store = MemoryScheduleStore::new(vec![language(1, "Rust")], vec![snippet(20, 2)]);
    let rotator = Rotator::new(&store, 30, SnippetPolicy::MatchLanguage);

    let report = rotator
        .rotate(day(2024, 1, 1), &mut StdRng::seed_from_u64(7))
        .await
        .unwrap();

    assert_eq!(report.written, 0);
    assert_eq!(report.skipped.len(), 30);
    assert_eq!(store.len(), 0);
}

#[tokio::test]
async fn match_policy_pairs_languages_with_their_snippets() {
    let store = reference_store();
    let rotator = Rotator::new(&store, 30, SnippetPolicy::MatchLanguage);

    let report = rotator
        .rotate(day(2024, 1, 1), &mut StdRng::seed_from_u64(8))
        .await
        .unwrap();

    assert_eq!(report.written, 30);
    for date in store.dates() {
        let answer = store.get(date).unwrap();
        match answer.language_id {
            1 => assert!([10, 11].contains(&answer.snippet_id)),
            2 => assert_eq!(answer.snippet_id, 20),
            other => panic!("unexpected language id {other}"),
        }
    }
}
