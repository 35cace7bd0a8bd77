//! `polydle-rotation` — the rolling answer-schedule generator.
//!
//! # Overview
//!
//! Each run refreshes a fixed forward window of daily answers: every record
//! dated after today is purged, then one fresh `{date, language, snippet}`
//! assignment is written per day from tomorrow through `today + window`.
//! Records dated today or earlier are never touched, so an answer that has
//! already been revealed to players stays stable.
//!
//! The generator is split into a pure planning function ([`generator::plan`])
//! and an orchestrator ([`Rotator`]) that talks to a backend through the
//! [`ScheduleStore`] trait. Two backends ship: the relational `answer` table
//! and a document collection keyed by `YYYY-MM-DD` ids.

pub mod error;
pub mod generator;
pub mod store;

pub use error::{Result, RotationError};
pub use generator::{plan, RotationPlan, SnippetPolicy};
pub use store::{
    DocumentScheduleStore, RelationalScheduleStore, RotationReport, Rotator, ScheduleStore,
};
