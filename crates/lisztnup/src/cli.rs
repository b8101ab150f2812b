//! Command-line interface for lisztnup.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lisztnup - place classical works on your timeline
#[derive(Parser, Debug)]
#[command(name = "lisztnup")]
#[command(about = "Chronological card placement game engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a headless game between simulated seats
    Simulate {
        /// Catalog JSON to draw cards from (built-in demo deck if omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Game configuration TOML
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of seats
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Probability a seat knows the right slot
        #[arg(long, default_value = "0.7")]
        skill: f64,

        /// Seed for the deck shuffle and the seats
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Stop after this many turns
        #[arg(long, default_value = "500")]
        max_turns: usize,

        /// Only use works of these types (repeatable)
        #[arg(long = "kind")]
        kinds: Vec<String>,

        /// Minimum work score
        #[arg(long, default_value = "0")]
        min_score: f64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what a catalog yields
    Catalog {
        /// Catalog JSON
        #[arg(long = "catalog")]
        path: PathBuf,

        /// Only count works of these types (repeatable)
        #[arg(long = "kind")]
        kinds: Vec<String>,

        /// Minimum work score
        #[arg(long, default_value = "0")]
        min_score: f64,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}
