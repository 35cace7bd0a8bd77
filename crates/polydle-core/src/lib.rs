//! `polydle-core` — shared config, error, and entity types for the Polydle
//! admin toolkit.

pub mod config;
pub mod error;
pub mod types;

pub use config::PolydleConfig;
pub use error::{CoreError, Result};
pub use types::{DailyAnswer, Language, Snippet};
