// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{Read, Write};
use std::path::PathBuf;

use cdlidb::app_config::{Config, LogLevel};
use cdlidb::atf::extract_atf;
use cdlidb::database::{DatabaseConnection, Repository};
use cdlidb::file_utils::FileManager;
use cdlidb::Importer;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import CDLI JSON exports (files or directories)
    Import {
        /// Export files or directories containing *.json files
        #[arg(value_name = "INPUT_PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Drop all existing data before importing
        #[arg(long)]
        reset: bool,
    },

    /// Print the cleaned transliteration and translation of raw ATF text
    Clean {
        /// ATF file to read (stdin when omitted)
        #[arg(value_name = "ATF_FILE")]
        file: Option<PathBuf>,
    },

    /// Show a stored inscription
    Show {
        /// Inscription identifier
        inscription_id: i64,
    },

    /// Set or clear the personal translation of an inscription
    Translate {
        /// Inscription identifier
        inscription_id: i64,

        /// Translation text
        #[arg(required_unless_present = "clear")]
        text: Option<String>,

        /// Remove the personal translation
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },

    /// Re-derive transliterations and translations of all stored inscriptions
    Recompute,

    /// Show database statistics and recent imports
    Stats,

    /// Generate shell completions for cdlidb
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// cdlidb - CDLI artifact importer
///
/// Loads CDLI JSON exports into SQLite and derives a cleaned transliteration
/// and an aligned translation from every inscription's ATF text.
#[derive(Parser, Debug)]
#[command(name = "cdlidb")]
#[command(version)]
#[command(about = "CDLI export importer with ATF normalization")]
#[command(long_about = "cdlidb imports CDLI JSON exports into a SQLite database, normalizing ATF transliterations and aligning existing translations with their line numbers.

EXAMPLES:
    cdlidb import cdli_dump.json               # Import one export
    cdlidb import --reset exports/             # Re-import a directory from scratch
    cdlidb clean tablet.atf                    # Preview ATF processing
    cdlidb show 12345                          # Show a stored inscription
    cdlidb translate 12345 \"my translation\"    # Save a personal translation
    cdlidb completions bash > cdlidb.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in cdlidb.json by default. If the config file
    doesn't exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "cdlidb.json", global = true)]
    config_path: String,

    /// SQLite database file (overrides the configuration)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install at the most verbose level; the effective level is set below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let CommandLineOptions {
        command,
        config_path,
        database,
        log_level,
    } = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let open_repository = || open_store(&config_path, database.as_ref(), log_level.as_ref());

    match command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cdlidb", &mut std::io::stdout());
        }
        Commands::Clean { file } => run_clean(file.as_ref())?,
        Commands::Import { paths, reset } => {
            let (config, repository) = open_repository()?;
            let importer = Importer::new(repository).with_reset(reset || config.reset_on_import);
            let summary = importer.import_paths(&paths).await?;
            println!("{}", summary);
        }
        Commands::Show { inscription_id } => {
            let (_, repository) = open_repository()?;
            run_show(&repository, inscription_id).await?;
        }
        Commands::Translate {
            inscription_id,
            text,
            clear,
        } => {
            let (_, repository) = open_repository()?;
            let translation = if clear { None } else { text };
            if !repository
                .set_personal_translation(inscription_id, translation)
                .await?
            {
                return Err(anyhow!("No inscription with id {}", inscription_id));
            }
            info!("Personal translation of inscription {} updated", inscription_id);
        }
        Commands::Recompute => {
            let (_, repository) = open_repository()?;
            let changed = repository.recompute_derived_fields().await?;
            println!("Recomputed {} inscription(s)", changed);
        }
        Commands::Stats => {
            let (_, repository) = open_repository()?;
            println!("{}", repository.connection().stats()?);
            for run in repository.list_import_runs().await?.iter().take(10) {
                println!(
                    "{}  {}  {}  {}/{} imported, {} skipped",
                    run.started_at,
                    run.status,
                    run.source_path,
                    run.imported_count,
                    run.record_count,
                    run.skipped_count
                );
            }
        }
    }

    Ok(())
}

// Load the configuration, apply CLI overrides and open the database
fn open_store(
    config_path: &str,
    database: Option<&PathBuf>,
    log_level: Option<&CliLogLevel>,
) -> Result<(Config, Repository)> {
    let mut config = Config::load_or_create(config_path)?;

    if let Some(database) = database {
        config.database_path = Some(database.to_string_lossy().to_string());
    }

    match log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    config.validate().context("Configuration validation failed")?;

    let db_path = config.resolved_database_path()?;
    let repository = Repository::new(DatabaseConnection::new(&db_path)?);
    Ok((config, repository))
}

fn run_clean(file: Option<&PathBuf>) -> Result<()> {
    let raw_atf = match file {
        Some(path) => FileManager::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read ATF from stdin")?;
            buffer
        }
    };

    let extraction = extract_atf(Some(&raw_atf));

    match extraction.cleaned_transliteration {
        Some(text) => println!("== Transliteration ==\n{}", text),
        None => warn!("No transliteration lines found"),
    }
    if let Some(text) = extraction.existing_translation {
        println!("\n== Translation ==\n{}", text);
    }

    Ok(())
}

async fn run_show(repository: &Repository, inscription_id: i64) -> Result<()> {
    let inscription = repository
        .get_inscription(inscription_id)
        .await?
        .ok_or_else(|| anyhow!("No inscription with id {}", inscription_id))?;

    let designation = repository
        .get_artifact(inscription.artifact_id)
        .await?
        .and_then(|artifact| artifact.designation)
        .unwrap_or_default();

    println!("Inscription {} (artifact {} {})", inscription.inscription_id, inscription.artifact_id, designation);

    let sections = [
        ("Transliteration", &inscription.cleaned_transliteration),
        ("Existing translation", &inscription.existing_translation),
        ("Personal translation", &inscription.personal_translation),
    ];
    for (title, text) in sections {
        println!("\n== {} ==\n{}", title, text.as_deref().unwrap_or("(none)"));
    }

    Ok(())
}
