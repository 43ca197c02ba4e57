//! # Moodbox
//!
//! Pick a mood, get a handful of songs from your catalog; or open the
//! mystery box for one surprise song.
//!
//! ## Usage
//!
//! ```bash
//! # What can this catalog do?
//! moodbox --catalog spotify.csv moods
//!
//! # Five popular songs
//! moodbox --catalog spotify.csv recommend popular
//!
//! # One surprise
//! moodbox --catalog spotify.csv mystery
//!
//! # Keep picking in one session
//! moodbox --catalog spotify.csv interactive
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use moodbox::catalog::Catalog;
use moodbox::cli::{self, Command};
use moodbox::config::RuntimeConfig;
use moodbox::engine::{MoodEngine, NoMatchPolicy};
use moodbox::session::Session;
use moodbox::{completion, interactive, loader};
use std::io;
use std::sync::Arc;

/// Merge the config file with command-line overrides.
fn resolve_config(args: &cli::Args) -> Result<RuntimeConfig> {
    let mut config = match &args.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::load_default()?,
    };
    if let Some(catalog) = &args.catalog {
        config.catalog_path = catalog.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    debug!("Effective config: {config:?}");
    Ok(config)
}

fn load_catalog(config: &RuntimeConfig) -> Result<Arc<Catalog>> {
    let path = config.resolved_catalog_path()?;
    let catalog = loader::load_catalog(&path, &config.loader)
        .with_context(|| format!("Could not load song catalog from {}", path.display()))?;
    Ok(Arc::new(catalog))
}

/// Main entry point for Moodbox.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug moodbox recommend chill`
/// - `RUST_LOG=moodbox::loader=trace moodbox moods`
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    if let Command::Completion { shell } = &args.command {
        let mut cmd = cli::Args::command();
        completion::generate_completions(completion::shell_to_completion_shell(shell), &mut cmd);
        return Ok(());
    }

    let config = resolve_config(&args)?;
    let catalog = load_catalog(&config)?;
    let mut session = Session::from_seed(config.seed);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Moods => {
            let engine = MoodEngine::new(catalog);
            interactive::write_moods(&mut out, &engine)?;
        }
        Command::Recommend { mood, count, fallback } => {
            let sample_size = count.unwrap_or(config.sample_size);
            anyhow::ensure!(sample_size >= 1, "--count must be at least 1");
            let policy = if fallback {
                NoMatchPolicy::FallbackRandom
            } else {
                config.no_match_policy
            };

            info!("Recommending {sample_size} songs for mood `{mood}'");
            let engine = MoodEngine::new(catalog)
                .with_sample_size(sample_size)
                .with_policy(policy);
            let recommendation = session
                .recommend(&engine, mood.mood())
                .with_context(|| format!("Cannot recommend songs for mood `{mood}'"))?;
            interactive::write_recommendation(&mut out, &recommendation)?;
        }
        Command::Mystery => {
            let engine = MoodEngine::new(catalog);
            let outcome = session
                .open_mystery(&engine)
                .context("Cannot open the mystery box")?;
            interactive::write_mystery(&mut out, &outcome)?;
        }
        Command::Interactive { policy } => {
            let engine = MoodEngine::new(catalog)
                .with_sample_size(config.sample_size)
                .with_policy(policy.unwrap_or(config.no_match_policy));
            interactive::run(&engine, &mut session, io::stdin().lock(), &mut out)?;
        }
        // Handled before the catalog is loaded.
        Command::Completion { .. } => {}
    }

    Ok(())
}
