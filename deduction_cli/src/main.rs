//! `deduce`: think of a character and the engine tries to guess it.

mod config;
mod terminal;

use anyhow::{bail, Context, Result};
use clap::Parser;
use deduction_core::{play, PlayError, Presenter, Session};
use entity_catalog::JsonFileStore;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use terminal::TerminalPresenter;

#[derive(Parser)]
#[command(name = "deduce")]
#[command(about = "Think of a character; answer yes, no, or don't know until it is guessed")]
#[command(version)]
struct Cli {
    /// Catalog file (JSON array of entity records)
    #[arg(short, long, env = "DEDUCE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Directory holding entity pictures
    #[arg(short, long)]
    images: Option<PathBuf>,

    /// Configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.catalog {
            config.catalog.path = path.clone();
            config.catalog.fallback_path = None;
        }
        if let Some(dir) = &self.images {
            config.images.dir = dir.clone();
        }
        if self.verbose {
            config.log.filter = "debug".to_string();
        }
    }
}

fn init_tracing(config: &AppConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(&config.log.filter)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn locate_catalog(config: &AppConfig) -> Result<JsonFileStore> {
    match config.catalog.locate() {
        Some(store) => Ok(store),
        None => {
            let tried: Vec<String> = config
                .catalog
                .candidates()
                .iter()
                .map(|path| path.display().to_string())
                .collect();
            bail!("catalog file not found (looked in: {})", tried.join(", "))
        }
    }
}

fn is_end_of_input(error: &PlayError) -> bool {
    matches!(error, PlayError::Io(error) if error.kind() == ErrorKind::UnexpectedEof)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    init_tracing(&config, cli.verbose);

    let store = locate_catalog(&config)?;
    let mut session = Session::load(&store)
        .with_context(|| format!("failed to load catalog {}", store.path().display()))?;
    info!(
        session = %session.id(),
        catalog = %store.path().display(),
        entities = session.catalog().len(),
        "catalog ready"
    );

    let stdin = io::stdin();
    let mut presenter = TerminalPresenter::new(stdin.lock(), io::stdout(), config.images.clone());
    println!("Think of a character and answer the questions.");

    loop {
        match play(&mut session, &mut presenter, &store) {
            Ok(_) => {}
            Err(error) if is_end_of_input(&error) => break,
            Err(error) => return Err(error).context("play-through failed"),
        }

        match presenter.request_confirmation("Play again?") {
            Ok(true) => continue,
            Ok(false) => break,
            Err(error) if error.kind() == ErrorKind::UnexpectedEof => break,
            Err(error) => return Err(error).context("failed to read from the terminal"),
        }
    }

    if session.is_finished() {
        info!(session = %session.id(), "goodbye");
    } else {
        warn!(session = %session.id(), phase = session.phase().name(), "input closed mid-round");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from(["deduce", "--catalog", "roster.json", "-i", "pics", "-v"]);
        let mut config = AppConfig::default();

        cli.apply(&mut config);

        assert_eq!(config.catalog.path, PathBuf::from("roster.json"));
        assert_eq!(config.catalog.fallback_path, None);
        assert_eq!(config.images.dir, PathBuf::from("pics"));
        assert_eq!(config.log.filter, "debug");
    }

    #[test]
    fn test_no_flags_keep_config() {
        let cli = Cli::parse_from(["deduce"]);
        let mut config = AppConfig::default();

        cli.apply(&mut config);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_missing_catalog_lists_paths() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.catalog.path = dir.path().join("absent.json");
        config.catalog.fallback_path = Some(dir.path().join("also_absent.json"));

        let error = locate_catalog(&config).unwrap_err().to_string();
        assert!(error.contains("absent.json"));
        assert!(error.contains("also_absent.json"));
    }
}
