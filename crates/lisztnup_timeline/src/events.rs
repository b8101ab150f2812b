//! Notifications for the rendering layer.

use crate::card::PlayerIndex;
use crate::ids::{CardId, EntryId, StackEntryId};
use crate::resolution::{RevealPurpose, RevealState};
use serde::{Deserialize, Serialize};

/// Something the view should react to.
///
/// Events are queued in emission order and drained by the host; they are
/// snapshots, so holding one never lets the view mutate engine state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A face-up card was dealt during setup.
    DealtCard {
        /// Receiving player.
        player: PlayerIndex,
        /// New timeline entry.
        entry: EntryId,
        /// Dealt card.
        card: CardId,
    },
    /// A player's turn began.
    TurnStarted {
        /// Player holding the turn.
        player: PlayerIndex,
    },
    /// The top of the center stack is ready to be played.
    CardPlayable {
        /// Player holding the turn.
        player: PlayerIndex,
        /// Stack slot now on top.
        stack_entry: StackEntryId,
    },
    /// A dragged card landed and awaits confirmation.
    PlacementPending {
        /// Player holding the turn.
        player: PlayerIndex,
        /// Pending entry.
        entry: EntryId,
        /// Index it landed at.
        index: usize,
    },
    /// A reveal should be shown.
    RevealOpened(RevealState),
    /// The reveal was dismissed.
    RevealClosed {
        /// Revealed entry.
        entry: EntryId,
        /// Why it was revealed.
        purpose: RevealPurpose,
    },
    /// A wrong placement left the timeline.
    EntryDiscarded {
        /// Owner of the entry.
        player: PlayerIndex,
        /// Removed entry.
        entry: EntryId,
    },
    /// No card is left anywhere; play affordances should be disabled.
    SupplyExhausted,
    /// A player reached the win target.
    GameWon {
        /// Winner.
        player: PlayerIndex,
    },
}
