//! Card supply: the draw pile and the center stack.
//!
//! Cards move strictly one way: source → draw pile → center stack → caller.
//! Every move pops, so a card is never held by both the pile and the stack.
//! Cards the source hands out while already in play are refused at the pile.

use crate::card::Card;
use crate::ids::{CardId, IdAllocator, StackEntryId};
use crate::source::CardSource;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument, warn};

/// Consecutive repeated samples after which a source counts as exhausted.
const MAX_REPEATED_SAMPLES: usize = 32;

/// A face-down card waiting in the center stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// Slot identity, independent of the card.
    pub id: StackEntryId,
    /// The card in this slot.
    pub card: Card,
}

/// Draw pile plus center stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSupply {
    draw_pile: VecDeque<Card>,
    center: VecDeque<StackEntry>,
}

impl CardSupply {
    /// Empty supply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Undealt cards, oldest first.
    pub fn draw_pile(&self) -> &VecDeque<Card> {
        &self.draw_pile
    }

    /// Center stack, front is the next playable card.
    pub fn center(&self) -> &VecDeque<StackEntry> {
        &self.center
    }

    /// The next playable card, if any.
    pub fn top(&self) -> Option<&StackEntry> {
        self.center.front()
    }

    /// True when neither the pile nor the stack holds a card.
    pub fn is_depleted(&self) -> bool {
        self.draw_pile.is_empty() && self.center.is_empty()
    }

    /// True when the pile or the stack holds `id`.
    pub fn holds(&self, id: CardId) -> bool {
        self.draw_pile.iter().any(|c| c.id() == id)
            || self.center.iter().any(|e| e.card.id() == id)
    }

    /// Tops the draw pile up to `min_count` cards.
    ///
    /// Cards already in the supply or listed in `in_play` are skipped. Stops
    /// quietly when the source runs dry, or after
    /// `MAX_REPEATED_SAMPLES` repeats in a row. Returns the number of cards
    /// added.
    #[instrument(skip(self, source, in_play), fields(size = self.draw_pile.len()))]
    pub fn refill_draw_pile(
        &mut self,
        source: &mut dyn CardSource,
        min_count: usize,
        in_play: &HashSet<CardId>,
    ) -> usize {
        let mut added = 0;
        let mut repeats = 0;
        while self.draw_pile.len() < min_count {
            let Some(card) = source.sample() else {
                debug!(size = self.draw_pile.len(), "Card source exhausted");
                break;
            };
            if in_play.contains(&card.id()) || self.holds(card.id()) {
                warn!(card = %card.id(), "Skipping card already in play");
                repeats += 1;
                if repeats >= MAX_REPEATED_SAMPLES {
                    warn!(repeats, "Card source keeps repeating; treating it as exhausted");
                    break;
                }
                continue;
            }
            repeats = 0;
            self.draw_pile.push_back(card);
            added += 1;
        }
        added
    }

    /// Pops the oldest card from the draw pile, refilling first if it is empty.
    #[instrument(skip(self, source, in_play))]
    pub fn pop_draw_pile(
        &mut self,
        source: &mut dyn CardSource,
        refill_min: usize,
        in_play: &HashSet<CardId>,
    ) -> Option<Card> {
        if self.draw_pile.is_empty() {
            self.refill_draw_pile(source, refill_min.max(1), in_play);
        }
        self.draw_pile.pop_front()
    }

    /// Fills the center stack up to `target_depth` entries.
    ///
    /// Never grows the stack past `target_depth`. Stops quietly when no cards
    /// remain anywhere. Returns the number of entries added.
    #[instrument(skip(self, source, ids, in_play), fields(depth = self.center.len()))]
    pub fn restock_center_stack(
        &mut self,
        source: &mut dyn CardSource,
        ids: &mut IdAllocator,
        target_depth: usize,
        refill_min: usize,
        in_play: &HashSet<CardId>,
    ) -> usize {
        let mut added = 0;
        while self.center.len() < target_depth {
            let Some(card) = self.pop_draw_pile(source, refill_min, in_play) else {
                debug!(depth = self.center.len(), "No cards left to restock");
                break;
            };
            self.center.push_back(StackEntry {
                id: ids.stack_entry(),
                card,
            });
            added += 1;
        }
        added
    }

    /// Removes and returns the front of the center stack. Does not restock.
    #[instrument(skip(self))]
    pub fn draw_top(&mut self) -> Option<StackEntry> {
        let entry = self.center.pop_front();
        if let Some(entry) = &entry {
            debug!(stack_entry = %entry.id, card = %entry.card.id(), "Drew top card");
        }
        entry
    }

    /// Drops every card.
    pub fn clear(&mut self) {
        self.draw_pile.clear();
        self.center.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DeckSource;

    fn none() -> HashSet<CardId> {
        HashSet::new()
    }

    fn source(n: u64) -> DeckSource {
        DeckSource::ordered((1..=n).map(|i| Card::dated(i, "w", 1800 + i as i32)).collect())
    }

    #[test]
    fn test_refill_stops_at_minimum() {
        let mut supply = CardSupply::new();
        let mut src = source(30);
        assert_eq!(supply.refill_draw_pile(&mut src, 10, &none()), 10);
        assert_eq!(supply.refill_draw_pile(&mut src, 10, &none()), 0);
        assert_eq!(supply.draw_pile().len(), 10);
    }

    #[test]
    fn test_refill_tolerates_exhaustion() {
        let mut supply = CardSupply::new();
        let mut src = source(3);
        assert_eq!(supply.refill_draw_pile(&mut src, 10, &none()), 3);
        assert_eq!(supply.draw_pile().len(), 3);
    }

    #[test]
    fn test_restock_is_fifo() {
        let mut supply = CardSupply::new();
        let mut ids = IdAllocator::new();
        let mut src = source(10);
        supply.refill_draw_pile(&mut src, 4, &none());
        supply.restock_center_stack(&mut src, &mut ids, 3, 4, &none());
        let keys: Vec<_> = supply.center().iter().map(|e| e.card.key()).collect();
        assert_eq!(keys, vec![1801, 1802, 1803]);
        assert_eq!(supply.draw_pile().len(), 1);
    }

    #[test]
    fn test_restock_refills_empty_pile() {
        let mut supply = CardSupply::new();
        let mut ids = IdAllocator::new();
        let mut src = source(10);
        assert_eq!(supply.restock_center_stack(&mut src, &mut ids, 6, 4, &none()), 6);
        assert_eq!(supply.center().len(), 6);
    }

    #[test]
    fn test_restock_with_nothing_left_leaves_stack_short() {
        let mut supply = CardSupply::new();
        let mut ids = IdAllocator::new();
        let mut src = source(2);
        assert_eq!(supply.restock_center_stack(&mut src, &mut ids, 6, 4, &none()), 2);
        assert_eq!(supply.center().len(), 2);
        supply.draw_top();
        supply.draw_top();
        assert!(supply.is_depleted());
        assert!(supply.draw_top().is_none());
    }

    #[test]
    fn test_draw_top_does_not_restock() {
        let mut supply = CardSupply::new();
        let mut ids = IdAllocator::new();
        let mut src = source(10);
        supply.restock_center_stack(&mut src, &mut ids, 2, 4, &none());
        let top = supply.draw_top().unwrap();
        assert_eq!(top.card.key(), 1801);
        assert_eq!(supply.center().len(), 1);
    }

    #[test]
    fn test_repeating_source_never_duplicates() {
        let mut supply = CardSupply::new();
        let mut n = 0;
        let mut src = move || {
            n += 1;
            Some(Card::dated(n % 2, "w", 1800))
        };
        assert_eq!(supply.refill_draw_pile(&mut src, 10, &none()), 2);
        let ids: HashSet<_> = supply.draw_pile().iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_cards_in_play_are_skipped() {
        let mut supply = CardSupply::new();
        let mut src = source(5);
        let in_play = HashSet::from([CardId(1), CardId(3)]);
        assert_eq!(supply.refill_draw_pile(&mut src, 10, &in_play), 3);
        let keys: Vec<_> = supply.draw_pile().iter().map(|c| c.key()).collect();
        assert_eq!(keys, vec![1802, 1804, 1805]);
    }
}
