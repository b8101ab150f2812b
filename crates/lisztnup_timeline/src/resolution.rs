//! Placement resolution, the reveal protocol and win detection.
//!
//! A reveal serves one of two purposes. A `turn` reveal follows a
//! confirmation and, when closed, either ends the game, discards a wrong
//! card or finalizes the turn. An `inspect` reveal shows a card already on a
//! timeline and has no effect at all when closed.

use crate::card::{Card, PlayerIndex};
use crate::contracts::{CanConfirm, CanInspect};
use crate::error::ActionError;
use crate::events::GameEvent;
use crate::game::TimelineGame;
use crate::ids::EntryId;
use crate::schedule::Task;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Why a reveal is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RevealPurpose {
    /// Resolving the active player's placement.
    Turn,
    /// Looking at a card already on a timeline.
    Inspect,
}

/// Snapshot handed to the reveal consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    /// Revealed entry.
    pub entry: EntryId,
    /// Owner of the entry.
    pub player: PlayerIndex,
    /// Revealed card.
    pub card: Card,
    /// Placement verdict; `None` for inspected cards never judged.
    pub is_correct: Option<bool>,
    /// Why the reveal is shown.
    pub purpose: RevealPurpose,
    /// True when this placement wins the game.
    pub reached_win: bool,
}

/// What closing a reveal led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseOutcome {
    /// An inspect reveal was dismissed; nothing else happened.
    Inspected,
    /// A correct card stays and the turn moved on.
    Kept,
    /// A wrong card is leaving; the turn moves on when the window ends.
    Discarding,
    /// The placement won the game.
    Won(PlayerIndex),
}

/// Whether `key` fits between its neighbours, both bounds inclusive.
///
/// A missing neighbour is an open bound.
pub fn placement_is_correct(prev: Option<i32>, key: i32, next: Option<i32>) -> bool {
    prev.is_none_or(|p| p <= key) && next.is_none_or(|n| key <= n)
}

/// Whether a correct placement brings the timeline to the win target.
///
/// `standing` counts every entry not marked wrong, including the new one.
pub fn reaches_win(is_correct: bool, standing: usize, win_target: usize) -> bool {
    is_correct && standing >= win_target
}

impl TimelineGame {
    /// Confirms the pending placement and opens its `turn` reveal.
    ///
    /// Judges the card against its neighbours in the active timeline, marks
    /// it confirmed and records the verdict. Further drags and confirms are
    /// refused until the reveal is closed and the turn is finalized.
    #[instrument(skip(self))]
    pub fn confirm_placement(&mut self, entry: EntryId) -> Result<RevealState, ActionError> {
        CanConfirm::check(self, entry)?;
        let player = self.turn.active_player();
        let win_target = *self.config.win_target();

        let timeline = self.timelines.get(player).ok_or(ActionError::UnknownEntry(entry))?;
        let index = timeline.position(entry).ok_or(ActionError::UnknownEntry(entry))?;
        let entries = timeline.entries();
        let card = entries[index].card.clone();
        let prev = index.checked_sub(1).map(|i| entries[i].card.key());
        let next = entries.get(index + 1).map(|e| e.card.key());
        let is_correct = placement_is_correct(prev, card.key(), next);

        self.turn.begin_resolution()?;
        let Some(timeline) = self.timelines.get_mut(player) else {
            return Err(ActionError::UnknownEntry(entry));
        };
        if let Some(placed) = timeline.get_mut(entry) {
            placed.confirmed = true;
            placed.correct = Some(is_correct);
        }
        let standing = timeline.standing_count();
        let reached_win = reaches_win(is_correct, standing, win_target);

        info!(
            player,
            %entry,
            key = card.key(),
            ?prev,
            ?next,
            is_correct,
            reached_win,
            "Placement resolved"
        );
        let reveal = RevealState {
            entry,
            player,
            card,
            is_correct: Some(is_correct),
            purpose: RevealPurpose::Turn,
            reached_win,
        };
        self.reveal = Some(reveal.clone());
        self.emit(GameEvent::RevealOpened(reveal.clone()));
        self.check_invariants();
        Ok(reveal)
    }

    /// Confirms whatever placement is pending.
    pub fn confirm_pending(&mut self) -> Result<RevealState, ActionError> {
        let entry = self.turn.pending_entry().ok_or(ActionError::NoPendingEntry)?;
        self.confirm_placement(entry)
    }

    /// Dismisses the open reveal and applies its consequences.
    #[instrument(skip(self))]
    pub fn close_reveal(&mut self) -> Result<CloseOutcome, ActionError> {
        let reveal = self.reveal.take().ok_or(ActionError::NoReveal)?;
        self.emit(GameEvent::RevealClosed {
            entry: reveal.entry,
            purpose: reveal.purpose,
        });

        let outcome = match reveal.purpose {
            RevealPurpose::Inspect => CloseOutcome::Inspected,
            RevealPurpose::Turn if reveal.reached_win => {
                self.declare_winner(reveal.player);
                CloseOutcome::Won(reveal.player)
            }
            RevealPurpose::Turn if reveal.is_correct == Some(false) => {
                if let Some(placed) = self
                    .timelines
                    .get_mut(reveal.player)
                    .and_then(|t| t.get_mut(reveal.entry))
                {
                    placed.is_discarding = true;
                }
                let id = self.ids.task();
                let delay = self.config.discard_delay();
                self.scheduler.schedule(
                    id,
                    delay,
                    Task::DiscardEntry {
                        player: reveal.player,
                        entry: reveal.entry,
                    },
                );
                debug!(entry = %reveal.entry, ?delay, "Discard scheduled");
                self.run_due_tasks();
                CloseOutcome::Discarding
            }
            RevealPurpose::Turn => {
                self.finalize_turn();
                CloseOutcome::Kept
            }
        };
        self.check_invariants();
        Ok(outcome)
    }

    /// Opens an `inspect` reveal for a confirmed card on any timeline.
    #[instrument(skip(self))]
    pub fn open_inspect(&mut self, entry: EntryId) -> Result<RevealState, ActionError> {
        CanInspect::check(self)?;
        let (player, found) = self.find_entry(entry).ok_or(ActionError::UnknownEntry(entry))?;
        if !found.confirmed {
            return Err(ActionError::NotConfirmed(entry));
        }
        let reveal = RevealState {
            entry,
            player,
            card: found.card.clone(),
            is_correct: found.correct,
            purpose: RevealPurpose::Inspect,
            reached_win: false,
        };
        debug!(%entry, player, "Inspect opened");
        self.reveal = Some(reveal.clone());
        self.emit(GameEvent::RevealOpened(reveal.clone()));
        Ok(reveal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between_neighbours() {
        assert!(placement_is_correct(Some(1800), 1825, Some(1850)));
        assert!(!placement_is_correct(Some(1850), 1825, Some(1900)));
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(placement_is_correct(None, 1800, Some(1800)));
        assert!(placement_is_correct(Some(1900), 1900, None));
    }

    #[test]
    fn test_empty_neighbourhood_always_fits() {
        assert!(placement_is_correct(None, 1234, None));
    }

    #[test]
    fn test_win_needs_correct_card() {
        assert!(reaches_win(true, 10, 10));
        assert!(!reaches_win(false, 10, 10));
        assert!(!reaches_win(true, 9, 10));
    }
}
