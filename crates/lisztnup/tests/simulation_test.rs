//! Tests for headless simulated sessions.

use lisztnup::{Ending, Placer, SimulatedPlayer, Simulation, TailPlacer, demo_cards};
use lisztnup_timeline::{Card, Catalog, CatalogFilter, DeckSource, GameConfig, GameStatus};
use std::io::Write;
use tempfile::NamedTempFile;

fn seats(n: usize, skill: f64) -> Vec<Box<dyn Placer>> {
    (0..n)
        .map(|i| Box::new(SimulatedPlayer::new(format!("Seat {i}"), skill, i as u64)) as Box<dyn Placer>)
        .collect()
}

#[test]
fn test_perfect_seat_wins_in_target_turns() {
    let mut sim = Simulation::new(
        GameConfig::default(),
        DeckSource::shuffled(demo_cards(), 11),
        seats(1, 1.0),
        100,
    );
    let report = sim.run().unwrap();
    assert_eq!(report.ending, Ending::Won);
    assert_eq!(report.winner.as_deref(), Some("Seat 0"));
    // One dealt card plus nine correct placements.
    assert_eq!(report.turns, 9);
    assert_eq!(report.players[0].placed, 9);
    assert_eq!(report.players[0].correct, 9);
    assert_eq!(report.players[0].timeline, 10);
    assert_eq!(sim.game().status(), GameStatus::Won(0));
}

#[test]
fn test_turn_limit_stops_session() {
    let mut sim = Simulation::new(
        GameConfig::default(),
        DeckSource::shuffled(demo_cards(), 5),
        seats(3, 0.5),
        4,
    );
    let report = sim.run().unwrap();
    assert_eq!(report.ending, Ending::TurnLimit);
    assert_eq!(report.turns, 4);
    assert_eq!(report.winner, None);
    let placed: usize = report.players.iter().map(|p| p.placed).sum();
    assert_eq!(placed, 4);
}

#[test]
fn test_small_deck_runs_out() {
    let cards = demo_cards().into_iter().take(5).collect();
    let mut sim = Simulation::new(
        GameConfig::default(),
        DeckSource::ordered(cards),
        vec![Box::new(TailPlacer::new("Tail"))],
        100,
    );
    let report = sim.run().unwrap();
    assert_eq!(report.ending, Ending::Exhausted);
    assert_eq!(report.turns, 4);
    assert!(sim.game().supply().is_depleted());
}

#[test]
fn test_same_seed_same_report() {
    let run = || {
        let mut sim = Simulation::new(
            GameConfig::default(),
            DeckSource::shuffled(demo_cards(), 99),
            seats(2, 0.6),
            200,
        );
        sim.run().unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_report_serializes_with_snake_case_ending() {
    let mut sim = Simulation::new(
        GameConfig::default(),
        DeckSource::shuffled(demo_cards(), 1),
        seats(2, 0.5),
        2,
    );
    let report = sim.run().unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ending"], "turn_limit");
    assert_eq!(json["players"].as_array().unwrap().len(), 2);
}

#[test]
fn test_catalog_and_config_files_drive_session() {
    let mut catalog_file = NamedTempFile::new().unwrap();
    let works: Vec<String> = (0..12)
        .map(|i| {
            format!(
                r#"{{"gid": "w{i}", "composer": "c", "name": "Work {i}", "type": "sonata",
                    "begin_year": {}, "score": 50.0,
                    "parts": [{{"name": "Work {i}", "deezer": [{}], "score": 100.0}}]}}"#,
                1700 + i * 7,
                1000 + i
            )
        })
        .collect();
    write!(
        catalog_file,
        r#"{{"composers": [{{"gid": "c", "name": "Composer"}}], "works": {{"sonata": [{}]}}}}"#,
        works.join(",")
    )
    .unwrap();
    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(config_file, "win_target = 4\ncenter_depth = 2\ndeal_interval_ms = 0").unwrap();

    let catalog = Catalog::from_file(catalog_file.path()).unwrap();
    let cards = catalog.cards(&CatalogFilter::default());
    assert_eq!(cards.len(), 12);
    let config = GameConfig::from_file(config_file.path()).unwrap();

    let mut sim = Simulation::new(config, DeckSource::shuffled(cards, 3), seats(1, 1.0), 50);
    let report = sim.run().unwrap();
    assert_eq!(report.ending, Ending::Won);
    assert_eq!(report.turns, 3);
    assert!(sim.game().supply().center().len() <= 2);
}

#[test]
fn test_long_timelines_stay_on_the_row() {
    let cards = (0..200u64)
        .map(|i| Card::dated(i + 1, format!("Work {i}"), 1000 + i as i32))
        .collect();
    let mut sim = Simulation::new(
        GameConfig::default().with_win_target(80),
        DeckSource::shuffled(cards, 3),
        seats(1, 1.0),
        200,
    );
    let report = sim.run().unwrap();
    assert_eq!(report.ending, Ending::Won);
    assert_eq!(report.turns, 79);
    assert_eq!(report.players[0].timeline, 80);
}
