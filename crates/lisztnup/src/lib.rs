//! Lisztnup - command-line driver for timeline games.
//!
//! Wires the [`lisztnup_timeline`] engine to simulated players, a built-in
//! demo deck and catalog statistics.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod catalog_stats;
pub mod demo;
pub mod players;
pub mod simulation;

pub use catalog_stats::{CatalogStats, KindStats};
pub use demo::demo_cards;
pub use players::{Placer, SimulatedPlayer, TailPlacer, correct_index};
pub use simulation::{Ending, PlayerReport, Simulation, SimulationReport};
