//! Per-player timelines of placed cards.

use crate::card::{Card, Player};
use crate::ids::EntryId;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A card on a player's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Entry identity.
    pub id: EntryId,
    /// The placed card.
    pub card: Card,
    /// False while the entry is a drag preview or awaits confirmation.
    pub confirmed: bool,
    /// Outcome of the last resolution; `None` once cleared or never judged.
    pub correct: Option<bool>,
    /// Set during the removal window of a wrong placement.
    pub is_discarding: bool,
}

impl TimelineEntry {
    /// A speculative entry for a card being placed.
    pub fn speculative(id: EntryId, card: Card) -> Self {
        Self {
            id,
            card,
            confirmed: false,
            correct: None,
            is_discarding: false,
        }
    }

    /// A confirmed entry with no correctness marking, as dealt at start.
    pub fn dealt(id: EntryId, card: Card) -> Self {
        Self {
            id,
            card,
            confirmed: true,
            correct: None,
            is_discarding: false,
        }
    }
}

/// One player's cards in placement order.
///
/// Order is the order the player chose, not chronological order: a wrong
/// placement sits where it was dropped until it is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerTimeline {
    player: Player,
    entries: Vec<TimelineEntry>,
}

impl PlayerTimeline {
    /// Empty timeline for `player`.
    pub fn new(player: Player) -> Self {
        Self {
            player,
            entries: Vec::new(),
        }
    }

    /// The owner.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Entries in layout order.
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of `id`, if present.
    pub fn position(&self, id: EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    /// Looks up an entry.
    pub fn get(&self, id: EntryId) -> Option<&TimelineEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EntryId) -> Option<&mut TimelineEntry> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Chronological keys in layout order.
    pub fn keys(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.card.key()).collect()
    }

    /// Entries that count toward winning: everything not marked wrong.
    pub fn standing_count(&self) -> usize {
        self.entries.iter().filter(|e| e.correct != Some(false)).count()
    }

    /// Appends an entry.
    pub(crate) fn push(&mut self, entry: TimelineEntry) {
        self.entries.push(entry);
    }

    /// Inserts at `index`, clamped to the end.
    #[instrument(skip(self, entry), fields(entry = %entry.id))]
    pub(crate) fn insert(&mut self, index: usize, entry: TimelineEntry) {
        let index = index.min(self.entries.len());
        debug!(index, "Inserting entry");
        self.entries.insert(index, entry);
    }

    /// Moves `id` so it lands at `target`, where `target` counts the entry
    /// itself at its old slot. Returns the final index.
    ///
    /// Moving forward past its own slot shifts the target down by one because
    /// the entry is removed before it is reinserted.
    #[instrument(skip(self))]
    pub(crate) fn move_to(&mut self, id: EntryId, target: usize) -> Option<usize> {
        let from = self.position(id)?;
        let mut to = target.min(self.entries.len());
        if to > from {
            to -= 1;
        }
        if to != from {
            let entry = self.entries.remove(from);
            self.entries.insert(to, entry);
            debug!(from, to, "Moved entry");
        }
        Some(to)
    }

    /// Puts `id` back at exactly `index`, clamped to the end.
    pub(crate) fn reposition(&mut self, id: EntryId, index: usize) -> Option<usize> {
        let entry = self.remove(id)?;
        let index = index.min(self.entries.len());
        self.entries.insert(index, entry);
        Some(index)
    }

    /// Removes and returns `id`.
    #[instrument(skip(self))]
    pub(crate) fn remove(&mut self, id: EntryId) -> Option<TimelineEntry> {
        let index = self.position(id)?;
        Some(self.entries.remove(index))
    }

    /// Clears every correctness marking.
    pub(crate) fn clear_marks(&mut self) {
        for entry in &mut self.entries {
            entry.correct = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(keys: &[i32]) -> PlayerTimeline {
        let mut t = PlayerTimeline::new(Player::new("Ada"));
        for (i, key) in keys.iter().enumerate() {
            t.push(TimelineEntry::dealt(EntryId(i as u64 + 1), Card::dated(i as u64 + 1, "w", *key)));
        }
        t
    }

    #[test]
    fn test_move_forward_adjusts_target() {
        let mut t = timeline(&[1, 2, 3, 4]);
        // Entry 1 dropped before entry 4 (target index 3 in the pre-move list).
        assert_eq!(t.move_to(EntryId(1), 3), Some(2));
        assert_eq!(t.keys(), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_move_backward_keeps_target() {
        let mut t = timeline(&[1, 2, 3, 4]);
        assert_eq!(t.move_to(EntryId(4), 1), Some(1));
        assert_eq!(t.keys(), vec![1, 4, 2, 3]);
    }

    #[test]
    fn test_move_onto_own_slot_is_stable() {
        let mut t = timeline(&[1, 2, 3]);
        assert_eq!(t.move_to(EntryId(2), 1), Some(1));
        assert_eq!(t.move_to(EntryId(2), 2), Some(1));
        assert_eq!(t.keys(), vec![1, 2, 3]);
    }

    #[test]
    fn test_move_to_end() {
        let mut t = timeline(&[1, 2, 3]);
        assert_eq!(t.move_to(EntryId(1), 3), Some(2));
        assert_eq!(t.keys(), vec![2, 3, 1]);
    }

    #[test]
    fn test_standing_count_ignores_only_wrong() {
        let mut t = timeline(&[1, 2, 3]);
        t.entries[0].correct = Some(true);
        t.entries[1].correct = Some(false);
        assert_eq!(t.standing_count(), 2);
        t.clear_marks();
        assert_eq!(t.standing_count(), 3);
    }
}
