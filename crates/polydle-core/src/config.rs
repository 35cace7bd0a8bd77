use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Forward window size used when `[rotation].window_days` is not set.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Top-level config (polydle.toml + POLYDLE_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PolydleConfig {
    #[serde(default)]
    pub relational: RelationalConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
}

/// Supabase-style relational store (PostgREST endpoint).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RelationalConfig {
    /// Project base URL, e.g. "https://xyz.supabase.co".
    #[serde(default)]
    pub url: String,
    /// Service-role key — sent as both `apikey` and bearer token.
    #[serde(default)]
    pub service_role_key: String,
}

/// Firestore-style document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_database")]
    pub database: String,
    /// REST endpoint root. Point at an emulator to run against local data.
    #[serde(default = "default_document_base_url")]
    pub base_url: String,
    /// OAuth access token. Optional — emulators accept unauthenticated calls.
    pub access_token: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_database(),
            base_url: default_document_base_url(),
            access_token: None,
        }
    }
}

/// Where the local reference datasets live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
        }
    }
}

/// Rolling-schedule settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// "any-language" or "match-language" — see `polydle-rotation`.
    #[serde(default = "default_policy")]
    pub policy: String,
    /// Relational table holding DailyAnswer rows.
    #[serde(default = "default_answer_table")]
    pub answer_table: String,
    /// Document collection holding DailyAnswer documents keyed by date.
    #[serde(default = "default_answer_collection")]
    pub answer_collection: String,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            policy: default_policy(),
            answer_table: default_answer_table(),
            answer_collection: default_answer_collection(),
        }
    }
}

fn default_database() -> String {
    "(default)".to_string()
}
fn default_document_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}
fn default_policy() -> String {
    "any-language".to_string()
}
fn default_answer_table() -> String {
    "answer".to_string()
}
fn default_answer_collection() -> String {
    "dailyAnswer".to_string()
}

impl PolydleConfig {
    /// Load config from a TOML file with POLYDLE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ./polydle.toml
    ///
    /// Env keys use a double underscore between the section and the field,
    /// so multi-word fields stay unambiguous:
    /// `POLYDLE_ROTATION__WINDOW_DAYS=7`, `POLYDLE_DATA__DIR=./fixtures`.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("polydle.toml");

        let config: PolydleConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("POLYDLE_").split("__"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        Ok(config)
    }
}
