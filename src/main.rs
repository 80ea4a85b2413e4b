//! Trie Dictionary - Main entrypoint.
//!
//! Loads configuration, initializes logging and dispatches to the requested
//! command. Without a command the interactive session is started.

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use trie_dictionary_lib::codec;
use trie_dictionary_lib::config::{self, ConfigLoader, DictionaryConfig, LogConfig};
use trie_dictionary_lib::error::{DictionaryError, DictionaryResult};
use trie_dictionary_lib::session;
use trie_dictionary_lib::storage::DictionaryFile;

/// Command line arguments for the trie dictionary.
#[derive(Parser, Debug)]
#[clap(name = "Trie Dictionary", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Dictionary file to use instead of the configured one
    #[clap(short, long, value_parser)]
    file: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive menu
    Shell,

    /// Add a word (or replace its definition) and save
    Add {
        /// Word to add
        word: String,

        /// Definition of the word
        definition: String,
    },

    /// Print the definition of a word
    Lookup {
        /// Word to look up
        word: String,
    },

    /// List stored words, optionally only those starting with a prefix
    List {
        /// Prefix to filter by
        prefix: Option<String>,
    },

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so they never interleave with the menu on stdout.
fn init_logging(log: &LogConfig) -> DictionaryResult<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| {
        DictionaryError::Custom(format!("Failed to set global tracing subscriber: {e}"))
    })
}

fn load_config(args: &Args) -> DictionaryResult<DictionaryConfig> {
    let mut config = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX).load()?;
    if let Some(file) = &args.file {
        config.set_dictionary_path(file)?;
    }
    Ok(config)
}

fn run(args: Args, config: DictionaryConfig) -> DictionaryResult<ExitCode> {
    let file = DictionaryFile::from_config(&config.storage);

    match args.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            info!(path = %file.path().display(), "Starting interactive session");
            let stdin = io::stdin();
            session::run_interactive(&file, stdin.lock(), io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Add { word, definition } => {
            codec::check_record(word.as_bytes(), &definition)?;
            let mut store = file.load_or_default()?;
            let is_new = store.insert(&word, definition)?;
            file.save(&store)?;
            println!(
                "{} '{word}'.",
                if is_new { "Added" } else { "Updated" }
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Lookup { word } => {
            let store = file.load_or_default()?;
            match store.lookup(&word) {
                Ok(definition) => {
                    println!("Definition of '{word}': {definition}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) if e.is_not_found() => {
                    println!("Word not found in the dictionary.");
                    Ok(ExitCode::FAILURE)
                }
                Err(e) => Err(e.into()),
            }
        }
        Command::List { prefix } => {
            let store = file.load_or_default()?;
            for (word, definition) in store.find_by_prefix(prefix.unwrap_or_default()) {
                println!("{word}: {definition}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let toml = DictionaryConfig::default().to_toml()?;

            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&output, toml)?;

            info!("Default configuration written to {:?}", output);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Main entry point for the application.
fn main() -> ExitCode {
    let args = <Args as clap::Parser>::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the file, so fall back to defaults here.
            let _ = init_logging(&LogConfig::default());
            error!("Configuration error: {}", e);
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.log) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(args, config) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
