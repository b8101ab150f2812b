//! Turn phases and the per-game turn state.
//!
//! ```text
//! idle ──card ready──▶ playing ──center drag──▶ locked
//!  ▲                     ▲                        │
//!  │                     └──── drag aborted ──────┤
//!  │                                              ▼
//!  └──────── turn finalized ◀────────────── resolving
//! ```

use crate::card::PlayerIndex;
use crate::error::ActionError;
use crate::ids::EntryId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Phase of the current round.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TurnPhase {
    /// Between turns, no card playable yet.
    Idle,
    /// Top-of-stack card is playable.
    Playing,
    /// A card is being dragged out of the center stack.
    Locked,
    /// A placement is pending or being resolved.
    Resolving,
}

/// Lifecycle of the whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Constructed or reset, nothing dealt.
    NotStarted,
    /// Initial cards are being dealt.
    Dealing,
    /// Turns are being played.
    InProgress,
    /// A player reached the win target.
    Won(PlayerIndex),
}

impl GameStatus {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<PlayerIndex> {
        match self {
            GameStatus::Won(player) => Some(*player),
            _ => None,
        }
    }
}

/// Whose turn it is and how far the turn has progressed.
///
/// `pending_entry` is set exactly when the phase is [`TurnPhase::Resolving`];
/// every transition below keeps the two in step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    active_player: PlayerIndex,
    phase: TurnPhase,
    pending_entry: Option<EntryId>,
    resolving_turn: bool,
}

impl TurnState {
    /// Fresh state: first player, idle.
    pub fn new() -> Self {
        Self {
            active_player: 0,
            phase: TurnPhase::Idle,
            pending_entry: None,
            resolving_turn: false,
        }
    }

    /// Index of the player holding the turn.
    pub fn active_player(&self) -> PlayerIndex {
        self.active_player
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Entry awaiting confirmation, if any.
    pub fn pending_entry(&self) -> Option<EntryId> {
        self.pending_entry
    }

    /// True while a confirmed placement is being revealed or discarded.
    pub fn resolving_turn(&self) -> bool {
        self.resolving_turn
    }

    fn expect(&self, expected: TurnPhase) -> Result<(), ActionError> {
        if self.phase == expected {
            Ok(())
        } else {
            warn!(%expected, actual = %self.phase, "Illegal turn transition");
            Err(ActionError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// `idle → playing`: a card became playable.
    #[instrument(skip(self))]
    pub(crate) fn card_ready(&mut self) -> Result<(), ActionError> {
        self.expect(TurnPhase::Idle)?;
        self.phase = TurnPhase::Playing;
        debug!(player = self.active_player, "Card playable");
        Ok(())
    }

    /// `playing → locked`: a card left the center stack.
    #[instrument(skip(self))]
    pub(crate) fn lock(&mut self) -> Result<(), ActionError> {
        self.expect(TurnPhase::Playing)?;
        self.phase = TurnPhase::Locked;
        Ok(())
    }

    /// `locked → playing`: the placement was aborted.
    #[instrument(skip(self))]
    pub(crate) fn unlock(&mut self) -> Result<(), ActionError> {
        self.expect(TurnPhase::Locked)?;
        self.phase = TurnPhase::Playing;
        Ok(())
    }

    /// `locked → resolving`: the placement landed and awaits confirmation.
    #[instrument(skip(self))]
    pub(crate) fn hold_pending(&mut self, entry: EntryId) -> Result<(), ActionError> {
        self.expect(TurnPhase::Locked)?;
        self.phase = TurnPhase::Resolving;
        self.pending_entry = Some(entry);
        Ok(())
    }

    /// Suspends drags and confirms while the pending entry is resolved.
    pub(crate) fn begin_resolution(&mut self) -> Result<(), ActionError> {
        self.expect(TurnPhase::Resolving)?;
        if self.resolving_turn {
            return Err(ActionError::ResolutionInProgress);
        }
        self.resolving_turn = true;
        Ok(())
    }

    /// `resolving → idle`, handing the turn to the next player.
    #[instrument(skip(self))]
    pub(crate) fn rotate(&mut self, player_count: usize) {
        self.pending_entry = None;
        self.resolving_turn = false;
        self.phase = TurnPhase::Idle;
        if player_count > 0 {
            self.active_player = (self.active_player + 1) % player_count;
        }
        debug!(player = self.active_player, "Turn rotated");
    }

    /// Ends all turn activity without rotating.
    pub(crate) fn halt(&mut self) {
        self.pending_entry = None;
        self.resolving_turn = false;
        self.phase = TurnPhase::Idle;
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cycle() {
        let mut turn = TurnState::new();
        turn.card_ready().unwrap();
        turn.lock().unwrap();
        turn.hold_pending(EntryId(9)).unwrap();
        assert_eq!(turn.pending_entry(), Some(EntryId(9)));
        turn.begin_resolution().unwrap();
        turn.rotate(3);
        assert_eq!(turn.phase(), TurnPhase::Idle);
        assert_eq!(turn.pending_entry(), None);
        assert_eq!(turn.active_player(), 1);
    }

    #[test]
    fn test_lock_requires_playing() {
        let mut turn = TurnState::new();
        assert_eq!(
            turn.lock(),
            Err(ActionError::WrongPhase {
                expected: TurnPhase::Playing,
                actual: TurnPhase::Idle,
            })
        );
        assert_eq!(turn.phase(), TurnPhase::Idle);
    }

    #[test]
    fn test_second_resolution_rejected() {
        let mut turn = TurnState::new();
        turn.card_ready().unwrap();
        turn.lock().unwrap();
        turn.hold_pending(EntryId(1)).unwrap();
        turn.begin_resolution().unwrap();
        assert_eq!(turn.begin_resolution(), Err(ActionError::ResolutionInProgress));
    }

    #[test]
    fn test_phase_display_is_lowercase() {
        assert_eq!(TurnPhase::Resolving.to_string(), "resolving");
    }
}
