//! `polydle-admin` — batch administration CLI for the Polydle datasets.
//!
//! Every subcommand is one self-contained batch job: load config, open a
//! store client, read input, write, log, exit. Non-zero exit on usage
//! errors (clap) and on any command failure.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod copy;
mod import;
mod rotate;

#[derive(Parser)]
#[command(name = "polydle-admin")]
#[command(version)]
#[command(about = "Batch administration for the Polydle game datasets")]
#[command(long_about = r#"
Copies, seeds, and refreshes Polydle's reference data across its two
backends: the document store and the relational store.

Example usage:
  polydle-admin import-languages --target relational
  polydle-admin import-csv --file data/snippets.csv
  polydle-admin copy-collection languages languages_backup
  polydle-admin rotate --days 30 --policy any-language
"#)]
struct Cli {
    /// Path to the config file (default: ./polydle.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Which backend a command writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Target {
    /// Firestore-style document store
    Document,
    /// Supabase-style relational store
    Relational,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy every document from one collection to another
    CopyCollection {
        /// Collection to read from
        source: String,
        /// Collection to write into
        destination: String,
    },

    /// Import the language dataset into a store
    ImportLanguages {
        /// Dataset file (default: {data.dir}/languages.json)
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Target::Relational)]
        target: Target,
    },

    /// Import the snippet dataset into a store
    ImportSnippets {
        /// Dataset file (default: {data.dir}/snippets.json)
        #[arg(short, long)]
        file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = Target::Relational)]
        target: Target,
    },

    /// Insert rows from the CSV snippet export into the relational store
    ImportCsv {
        /// CSV file (default: {data.dir}/snippets.csv)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Destination table
        #[arg(short, long, default_value = "snippet")]
        table: String,
    },

    /// Purge future answers and regenerate the rolling window
    Rotate {
        /// Window size in days (default: config value, 30)
        #[arg(long)]
        days: Option<u32>,

        /// Snippet policy: any-language | match-language
        #[arg(long)]
        policy: Option<String>,

        #[arg(short, long, value_enum, default_value_t = Target::Relational)]
        target: Target,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polydle=info".into()),
        )
        .init();

    // config: explicit flag > POLYDLE_CONFIG env > ./polydle.toml
    let config_path = cli
        .config
        .or_else(|| std::env::var("POLYDLE_CONFIG").ok());
    let config = polydle_core::PolydleConfig::load(config_path.as_deref())?;

    match cli.command {
        Commands::CopyCollection {
            source,
            destination,
        } => copy::copy_collection(&config, &source, &destination).await,

        Commands::ImportLanguages { file, target } => {
            import::import_languages(&config, file, target).await
        }

        Commands::ImportSnippets { file, target } => {
            import::import_snippets(&config, file, target).await
        }

        Commands::ImportCsv { file, table } => import::import_csv(&config, file, &table).await,

        Commands::Rotate {
            days,
            policy,
            target,
        } => rotate::rotate(&config, days, policy, target).await,
    }
}
