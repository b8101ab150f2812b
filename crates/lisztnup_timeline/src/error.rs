//! Rejection reasons for engine operations.

use crate::ids::EntryId;
use crate::turn::TurnPhase;

/// Why an operation was refused.
///
/// A rejected operation never changes engine state.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The game has not been started or is still dealing.
    #[display("Game is not accepting moves")]
    GameNotRunning,

    /// The game was started already; reset it first.
    #[display("Game has already been started")]
    AlreadyStarted,

    /// A player has already won.
    #[display("Game is already over")]
    GameOver,

    /// The operation needs a different turn phase.
    #[display("Expected phase {}, found {}", expected, actual)]
    WrongPhase {
        /// Phase the operation requires.
        expected: TurnPhase,
        /// Phase the turn is in.
        actual: TurnPhase,
    },

    /// Another drag gesture is in flight.
    #[display("A drag is already in progress")]
    DragInProgress,

    /// No drag gesture is in flight.
    #[display("No drag in progress")]
    NoActiveDrag,

    /// A placement is already awaiting confirmation.
    #[display("A placement is already pending")]
    PendingEntryExists,

    /// There is no placement to confirm or re-drag.
    #[display("No placement is pending")]
    NoPendingEntry,

    /// The pending entry is being resolved.
    #[display("A placement is being resolved")]
    ResolutionInProgress,

    /// A reveal is on screen and must be closed first.
    #[display("A reveal is already open")]
    RevealOpen,

    /// There is no reveal to close.
    #[display("No reveal is open")]
    NoReveal,

    /// The center stack has no card to draw.
    #[display("The center stack is empty")]
    StackEmpty,

    /// The entry does not exist in any timeline.
    #[display("Unknown entry {}", _0)]
    UnknownEntry(EntryId),

    /// The entry is not the one awaiting confirmation.
    #[display("Entry {} is not the pending placement", _0)]
    NotPending(EntryId),

    /// The entry is still speculative and cannot be inspected.
    #[display("Entry {} is not confirmed", _0)]
    NotConfirmed(EntryId),

    /// A game needs at least one player.
    #[display("A game needs at least one player")]
    NoPlayers,
}

impl std::error::Error for ActionError {}
