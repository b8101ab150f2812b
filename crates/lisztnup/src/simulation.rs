//! Headless sessions driven by simulated seats.
//!
//! A [`Simulation`] plays the engine exactly as a pointer-driven host would:
//! it presses on the center stack, moves the pointer over the chosen slot,
//! releases, confirms and dismisses the reveal. The virtual clock is
//! advanced straight to the next due task whenever the engine is waiting.

use crate::players::Placer;
use anyhow::{Context, Result, bail};
use lisztnup_timeline::{
    CardSource, CloseOutcome, DragKind, DropOutcome, GameConfig, GameEvent, GameStatus,
    LinearLayout, Player, TimelineGame, TurnPhase,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Spare slots past the longest timeline a session can build.
const ROW_HEADROOM: usize = 2;
/// Height of every simulated timeline row.
const ROW_HEIGHT: f32 = 120.0;
/// Width of one card slot.
const SLOT: f32 = 80.0;

/// Row width holding every slot a timeline can fill under `config`.
///
/// A timeline never grows past the win target, or past the opening deal if
/// that is larger, plus one speculative entry.
fn row_width(config: &GameConfig) -> f32 {
    let longest = (*config.win_target()).max(*config.starting_cards());
    (longest + ROW_HEADROOM) as f32 * SLOT
}

/// How a simulated session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Ending {
    /// A seat reached the win target.
    Won,
    /// No cards were left to play.
    Exhausted,
    /// The turn limit was hit first.
    TurnLimit,
}

/// Per-seat tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerReport {
    /// Seat name.
    pub name: String,
    /// Cards confirmed.
    pub placed: usize,
    /// Confirmed cards that were correct.
    pub correct: usize,
    /// Timeline length at the end.
    pub timeline: usize,
}

/// Summary of a finished session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// How the session ended.
    pub ending: Ending,
    /// Winning seat, if any.
    pub winner: Option<String>,
    /// Turns played.
    pub turns: usize,
    /// Virtual time elapsed.
    pub elapsed_ms: u128,
    /// Per-seat tallies, in seat order.
    pub players: Vec<PlayerReport>,
}

impl std::fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.winner {
            Some(winner) => writeln!(f, "{} won after {} turns", winner, self.turns)?,
            None => writeln!(f, "No winner ({}) after {} turns", self.ending, self.turns)?,
        }
        for p in &self.players {
            writeln!(
                f,
                "  {:<16} {:>3} placed  {:>3} correct  {:>3} on timeline",
                p.name, p.placed, p.correct, p.timeline
            )?;
        }
        Ok(())
    }
}

/// A headless game with one [`Placer`] per seat.
pub struct Simulation {
    game: TimelineGame,
    layout: LinearLayout,
    seats: Vec<Box<dyn Placer>>,
    tallies: Vec<(usize, usize)>,
    max_turns: usize,
}

impl Simulation {
    /// Builds a session; the game is started by [`Simulation::run`].
    pub fn new(
        config: GameConfig,
        source: impl CardSource + 'static,
        seats: Vec<Box<dyn Placer>>,
        max_turns: usize,
    ) -> Self {
        let layout = LinearLayout::rows(seats.len(), row_width(&config), ROW_HEIGHT, SLOT);
        let game = TimelineGame::new(config, source, layout.clone());
        let tallies = vec![(0, 0); seats.len()];
        Self {
            game,
            layout,
            seats,
            tallies,
            max_turns,
        }
    }

    /// The underlying engine.
    pub fn game(&self) -> &TimelineGame {
        &self.game
    }

    /// Plays until someone wins, the cards run out or the turn limit is hit.
    #[instrument(skip(self), fields(seats = self.seats.len(), max_turns = self.max_turns))]
    pub fn run(&mut self) -> Result<SimulationReport> {
        let names = self.seats.iter().map(|s| Player::new(s.name())).collect();
        self.game.start(names).context("Failed to start game")?;
        self.settle();

        let mut turns = 0;
        let ending = loop {
            if self.game.status().winner().is_some() {
                break Ending::Won;
            }
            if self.game.phase() == TurnPhase::Idle && self.game.supply().is_depleted() {
                break Ending::Exhausted;
            }
            if turns >= self.max_turns {
                break Ending::TurnLimit;
            }
            self.play_turn()?;
            self.settle();
            turns += 1;
        };

        let report = self.report(ending, turns);
        info!(ending = %report.ending, winner = ?report.winner, turns, "Simulation finished");
        Ok(report)
    }

    /// Plays one full turn for the active seat.
    #[instrument(skip(self), fields(player = self.game.active_player()))]
    fn play_turn(&mut self) -> Result<()> {
        let player = self.game.active_player();
        if self.game.phase() != TurnPhase::Playing {
            bail!("Seat {} cannot play in phase {}", player, self.game.phase());
        }

        self.game
            .begin_drag(DragKind::Center, self.layout.outside())
            .context("Failed to pick up card")?;
        let (timeline, card) = match (self.game.active_timeline(), self.game.drag()) {
            (Some(timeline), Some(drag)) => (timeline, &drag.card),
            _ => bail!("Drag started without a timeline"),
        };
        let len = timeline.len();
        let Some(seat) = self.seats.get_mut(player) else {
            bail!("No seat for player {}", player);
        };
        let index = seat.choose_index(timeline, card).min(len);
        let point = self
            .layout
            .drop_point(player, index, len)
            .context("Seat has no rendered timeline")?;
        self.game.drag_move(point).context("Failed to move card")?;

        match self.game.end_drag().context("Failed to drop card")? {
            DropOutcome::Placed { .. } => {}
            other => bail!("Card did not land: {:?}", other),
        }
        let reveal = self.game.confirm_pending().context("Failed to confirm")?;
        let correct = reveal.is_correct == Some(true);
        if let Some(tally) = self.tallies.get_mut(player) {
            tally.0 += 1;
            if correct {
                tally.1 += 1;
            }
        }
        info!(player, card = %reveal.card, index, correct, "Placement revealed");

        match self.game.close_reveal().context("Failed to close reveal")? {
            CloseOutcome::Won(winner) => info!(winner, "Winning placement"),
            outcome => debug!(?outcome, "Reveal closed"),
        }
        Ok(())
    }

    /// Runs the clock forward until no task is pending.
    fn settle(&mut self) {
        while let Some(due) = self.game.scheduler().pending().iter().map(|t| t.due).min() {
            let wait = due.saturating_sub(self.game.scheduler().now());
            self.game.advance(wait);
        }
        for event in self.game.drain_events() {
            match event {
                GameEvent::GameWon { player } => info!(player, "Game won"),
                GameEvent::SupplyExhausted => info!("Supply exhausted"),
                other => debug!(?other, "Event"),
            }
        }
    }

    fn report(&self, ending: Ending, turns: usize) -> SimulationReport {
        let winner = match self.game.status() {
            GameStatus::Won(player) => self.seats.get(player).map(|s| s.name().to_string()),
            _ => None,
        };
        let players = self
            .seats
            .iter()
            .zip(&self.tallies)
            .enumerate()
            .map(|(i, (seat, &(placed, correct)))| PlayerReport {
                name: seat.name().to_string(),
                placed,
                correct,
                timeline: self.game.timeline(i).map_or(0, |t| t.len()),
            })
            .collect();
        SimulationReport {
            ending,
            winner,
            turns,
            elapsed_ms: self.game.scheduler().now().as_millis(),
            players,
        }
    }
}
