//! Preconditions guarding every engine operation.
//!
//! Each precondition is a small checker returning the reason an operation
//! must be refused. Operations run their checks before touching any state,
//! so a refused operation is always a no-op.

use crate::error::ActionError;
use crate::game::TimelineGame;
use crate::ids::EntryId;
use crate::turn::{GameStatus, TurnPhase};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Single preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: turns are being played.
pub struct GameRunning;

impl GameRunning {
    /// Checks the game status.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        match game.status() {
            GameStatus::InProgress => Ok(()),
            GameStatus::Won(_) => Err(ActionError::GameOver),
            GameStatus::NotStarted | GameStatus::Dealing => Err(ActionError::GameNotRunning),
        }
    }
}

/// Precondition: no drag gesture is in flight.
pub struct NoActiveDrag;

impl NoActiveDrag {
    /// Checks the drag slot.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        if game.drag().is_some() {
            Err(ActionError::DragInProgress)
        } else {
            Ok(())
        }
    }
}

/// Precondition: a drag gesture is in flight.
pub struct DragActive;

impl DragActive {
    /// Checks the drag slot.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        if game.drag().is_none() {
            Err(ActionError::NoActiveDrag)
        } else {
            Ok(())
        }
    }
}

/// Precondition: no reveal is on screen.
pub struct NoOpenReveal;

impl NoOpenReveal {
    /// Checks the reveal slot.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        if game.reveal().is_some() {
            Err(ActionError::RevealOpen)
        } else {
            Ok(())
        }
    }
}

/// Precondition: nothing awaits confirmation.
pub struct NoPendingEntry;

impl NoPendingEntry {
    /// Checks the turn's pending entry.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        if game.turn().pending_entry().is_some() {
            Err(ActionError::PendingEntryExists)
        } else {
            Ok(())
        }
    }
}

/// Precondition: no confirmed placement is mid-resolution.
pub struct NotResolving;

impl NotResolving {
    /// Checks the resolving flag.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        if game.turn().resolving_turn() {
            Err(ActionError::ResolutionInProgress)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the turn is in a given phase.
pub struct PhaseIs;

impl PhaseIs {
    /// Checks the phase against `expected`.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame, expected: TurnPhase) -> Result<(), ActionError> {
        let actual = game.phase();
        if actual == expected {
            Ok(())
        } else {
            Err(ActionError::WrongPhase { expected, actual })
        }
    }
}

/// Precondition: the center stack has a card on top.
pub struct StackNotEmpty;

impl StackNotEmpty {
    /// Checks the center stack.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        if game.supply().top().is_none() {
            Err(ActionError::StackEmpty)
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Composite preconditions
// ─────────────────────────────────────────────────────────────

/// The top card may be dragged out of the center stack.
pub struct CanBeginCenterDrag;

impl CanBeginCenterDrag {
    /// Validates all preconditions for a `center` drag.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        GameRunning::check(game)?;
        NoActiveDrag::check(game)?;
        NoOpenReveal::check(game)?;
        NoPendingEntry::check(game)?;
        PhaseIs::check(game, TurnPhase::Playing)?;
        StackNotEmpty::check(game)
    }
}

/// The pending entry may be dragged to a new position.
pub struct CanRedragPending;

impl CanRedragPending {
    /// Validates all preconditions for a `pending` drag.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        GameRunning::check(game)?;
        NoActiveDrag::check(game)?;
        NoOpenReveal::check(game)?;
        NotResolving::check(game)?;
        PhaseIs::check(game, TurnPhase::Resolving)?;
        if game.turn().pending_entry().is_none() {
            return Err(ActionError::NoPendingEntry);
        }
        Ok(())
    }
}

/// `entry` may be confirmed.
pub struct CanConfirm;

impl CanConfirm {
    /// Validates all preconditions for confirming `entry`.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame, entry: EntryId) -> Result<(), ActionError> {
        GameRunning::check(game)?;
        NoActiveDrag::check(game)?;
        NotResolving::check(game)?;
        NoOpenReveal::check(game)?;
        match game.turn().pending_entry() {
            None => {
                warn!(%entry, "Confirm without a pending placement");
                Err(ActionError::NoPendingEntry)
            }
            Some(pending) if pending != entry => Err(ActionError::NotPending(entry)),
            Some(_) => PhaseIs::check(game, TurnPhase::Resolving),
        }
    }
}

/// An inspect reveal may be opened.
pub struct CanInspect;

impl CanInspect {
    /// Validates all preconditions for inspecting a card.
    #[instrument(skip(game))]
    pub fn check(game: &TimelineGame) -> Result<(), ActionError> {
        if matches!(game.status(), GameStatus::NotStarted | GameStatus::Dealing) {
            return Err(ActionError::GameNotRunning);
        }
        NoActiveDrag::check(game)?;
        NotResolving::check(game)?;
        NoPendingEntry::check(game)?;
        NoOpenReveal::check(game)
    }
}
