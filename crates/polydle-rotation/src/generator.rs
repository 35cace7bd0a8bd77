use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use polydle_core::{DailyAnswer, Language, Snippet};

/// How the snippet for a day is chosen once the language is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetPolicy {
    /// Draw uniformly from the whole snippet set. The default.
    AnyLanguage,
    /// Draw only from snippets whose `language_id` matches the day's
    /// language. A language with no snippets skips that day.
    MatchLanguage,
}

impl std::fmt::Display for SnippetPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SnippetPolicy::AnyLanguage => "any-language",
            SnippetPolicy::MatchLanguage => "match-language",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for SnippetPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "any-language" => Ok(SnippetPolicy::AnyLanguage),
            "match-language" => Ok(SnippetPolicy::MatchLanguage),
            other => Err(format!("unknown snippet policy: {other}")),
        }
    }
}

/// Output of one planning pass.
#[derive(Debug, Clone, Default)]
pub struct RotationPlan {
    /// One answer per plannable date, in date order.
    pub answers: Vec<DailyAnswer>,
    /// Dates that had to be skipped because their snippet pool was empty.
    pub skipped: Vec<NaiveDate>,
}

/// Plan answers for `today + 1` through `today + window_days`.
///
/// Pure: no I/O, no store access — randomness comes in through `rng`, so a
/// seeded generator makes the plan reproducible. A date whose snippet pool
/// resolves empty is recorded in `skipped` and the planning continues; it is
/// the caller's job to reject entirely empty reference data up front.
pub fn plan<R: Rng>(
    languages: &[Language],
    snippets: &[Snippet],
    today: NaiveDate,
    window_days: u32,
    policy: SnippetPolicy,
    rng: &mut R,
) -> RotationPlan {
    let mut plan = RotationPlan::default();

    for offset in 1..=i64::from(window_days) {
        let date = today + Duration::days(offset);

        let Some(language) = languages.choose(rng) else {
            plan.skipped.push(date);
            continue;
        };

        let snippet = match policy {
            SnippetPolicy::AnyLanguage => snippets.choose(rng),
            SnippetPolicy::MatchLanguage => {
                let pool: Vec<&Snippet> = snippets
                    .iter()
                    .filter(|s| s.language_id == Some(language.id))
                    .collect();
                pool.choose(rng).copied()
            }
        };

        let Some(snippet) = snippet else {
            warn!(%date, language = %language.name, "no snippets in pool, skipping date");
            plan.skipped.push(date);
            continue;
        };

        debug!(%date, language = %language.name, snippet_id = snippet.id, "planned answer");
        plan.answers.push(DailyAnswer {
            date,
            language_id: language.id,
            snippet_id: snippet.id,
        });
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn language(id: i64, name: &str) -> Language {
        Language {
            id,
            name: name.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn snippet(id: i64, language_id: Option<i64>) -> Snippet {
        Snippet {
            id,
            language_id,
            code: format!("// snippet {id}"),
            extra: serde_json::Map::new(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn window_covers_tomorrow_through_day_n() {
        let languages = vec![language(1, "Rust")];
        let snippets = vec![snippet(10, Some(1))];
        let mut rng = StdRng::seed_from_u64(1);

        let plan = plan(
            &languages,
            &snippets,
            day(2024, 1, 1),
            3,
            SnippetPolicy::AnyLanguage,
            &mut rng,
        );

        let dates: Vec<NaiveDate> = plan.answers.iter().map(|a| a.date).collect();
        assert_eq!(dates, vec![day(2024, 1, 2), day(2024, 1, 3), day(2024, 1, 4)]);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn any_language_policy_ignores_language_fk() {
        // the only snippet belongs to a different language — still eligible
        let languages = vec![language(1, "Rust")];
        let snippets = vec![snippet(10, Some(99))];
        let mut rng = StdRng::seed_from_u64(2);

        let plan = plan(
            &languages,
            &snippets,
            day(2024, 1, 1),
            5,
            SnippetPolicy::AnyLanguage,
            &mut rng,
        );

        assert_eq!(plan.answers.len(), 5);
        assert!(plan.answers.iter().all(|a| a.snippet_id == 10));
    }

    #[test]
    fn match_language_policy_pairs_snippet_with_language() {
        let languages = vec![language(1, "Rust"), language(2, "Go")];
        let snippets = vec![
            snippet(10, Some(1)),
            snippet(11, Some(1)),
            snippet(20, Some(2)),
        ];
        let mut rng = StdRng::seed_from_u64(3);

        let plan = plan(
            &languages,
            &snippets,
            day(2024, 1, 1),
            30,
            SnippetPolicy::MatchLanguage,
            &mut rng,
        );

        assert_eq!(plan.answers.len(), 30);
        for answer in &plan.answers {
            match answer.language_id {
                1 => assert!([10, 11].contains(&answer.snippet_id)),
                2 => assert_eq!(answer.snippet_id, 20),
                other => panic!("unexpected language id {other}"),
            }
        }
    }

    #[test]
    fn match_language_skips_snippetless_language() {
        // single language, all snippets belong to someone else
        let languages = vec![language(1, "Rust")];
        let snippets = vec![snippet(20, Some(2))];
        let mut rng = StdRng::seed_from_u64(4);

        let plan = plan(
            &languages,
            &snippets,
            day(2024, 1, 1),
            4,
            SnippetPolicy::MatchLanguage,
            &mut rng,
        );

        assert!(plan.answers.is_empty());
        assert_eq!(plan.skipped.len(), 4);
    }

    #[test]
    fn seeded_rng_makes_plan_reproducible() {
        let languages = vec![language(1, "Rust"), language(2, "Go"), language(3, "C")];
        let snippets = vec![snippet(10, Some(1)), snippet(20, Some(2)), snippet(30, Some(3))];

        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let plan_a = plan(&languages, &snippets, day(2024, 6, 1), 30, SnippetPolicy::AnyLanguage, &mut a);
        let plan_b = plan(&languages, &snippets, day(2024, 6, 1), 30, SnippetPolicy::AnyLanguage, &mut b);

        assert_eq!(plan_a.answers, plan_b.answers);
    }

    #[test]
    fn policy_round_trips_through_strings() {
        for policy in [SnippetPolicy::AnyLanguage, SnippetPolicy::MatchLanguage] {
            let parsed: SnippetPolicy = policy.to_string().parse().unwrap();
            assert_eq!(parsed, policy);
        }
        assert!("whatever".parse::<SnippetPolicy>().is_err());
    }
}
