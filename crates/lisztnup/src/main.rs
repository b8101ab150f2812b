//! Lisztnup - Unified CLI
//!
//! Headless timeline games and catalog inspection.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use lisztnup::{CatalogStats, Placer, SimulatedPlayer, Simulation, demo_cards};
use lisztnup_timeline::{Catalog, CatalogFilter, DeckSource, GameConfig};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            catalog,
            config,
            players,
            skill,
            seed,
            max_turns,
            kinds,
            min_score,
            json,
        } => run_simulation(
            catalog,
            config,
            players,
            skill,
            seed,
            max_turns,
            CatalogFilter { kinds, min_score },
            json,
        ),
        Command::Catalog {
            path,
            kinds,
            min_score,
            json,
        } => run_catalog(path, CatalogFilter { kinds, min_score }, json),
    }
}

/// Play a headless game and print the report
#[allow(clippy::too_many_arguments)]
#[instrument(skip(filter))]
fn run_simulation(
    catalog: Option<PathBuf>,
    config: Option<PathBuf>,
    players: usize,
    skill: f64,
    seed: u64,
    max_turns: usize,
    filter: CatalogFilter,
    json: bool,
) -> Result<()> {
    if players == 0 {
        bail!("At least one player is required");
    }
    let config = match config {
        Some(path) => GameConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let cards = match catalog {
        Some(path) => Catalog::from_file(&path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?
            .cards(&filter),
        None => demo_cards(),
    };
    info!(cards = cards.len(), "Deck ready");

    let seats: Vec<Box<dyn Placer>> = (0..players)
        .map(|i| {
            Box::new(SimulatedPlayer::new(
                format!("Player {}", i + 1),
                skill,
                seed.wrapping_add(i as u64 + 1),
            )) as Box<dyn Placer>
        })
        .collect();
    let mut simulation = Simulation::new(config, DeckSource::shuffled(cards, seed), seats, max_turns);
    let report = simulation.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}

/// Print catalog statistics
#[instrument(skip(filter))]
fn run_catalog(path: PathBuf, filter: CatalogFilter, json: bool) -> Result<()> {
    let catalog = Catalog::from_file(&path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;
    let stats = CatalogStats::gather(&catalog, &filter);
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", stats);
    }
    Ok(())
}
