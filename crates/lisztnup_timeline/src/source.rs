//! Card sources feeding the draw pile.

use crate::card::Card;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Supplier of playable cards.
///
/// Sampling, weighting and audio availability checks all happen behind this
/// trait. Returning `None` means the source is exhausted; it is never an
/// error and callers stop requesting cards for the current refill.
pub trait CardSource {
    /// Produces the next card, or `None` when no more cards are available.
    fn sample(&mut self) -> Option<Card>;
}

impl<F> CardSource for F
where
    F: FnMut() -> Option<Card>,
{
    fn sample(&mut self) -> Option<Card> {
        self()
    }
}

/// A finite, shuffled deck.
///
/// Every card is handed out exactly once. The shuffle is fully determined by
/// the seed.
#[derive(Debug, Clone)]
pub struct DeckSource {
    cards: Vec<Card>,
}

impl DeckSource {
    /// Shuffles `cards` with a seeded generator.
    #[instrument(skip(cards), fields(count = cards.len()))]
    pub fn shuffled(mut cards: Vec<Card>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        cards.shuffle(&mut rng);
        debug!("Deck shuffled");
        Self { cards }
    }

    /// Keeps `cards` in the given order; the first card is dealt first.
    pub fn ordered(mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Self { cards }
    }

    /// Number of cards not yet sampled.
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl CardSource for DeckSource {
    fn sample(&mut self) -> Option<Card> {
        self.cards.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck() -> Vec<Card> {
        (0..20).map(|i| Card::dated(i, format!("Work {i}"), 1700 + i as i32)).collect()
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut a = DeckSource::shuffled(deck(), 42);
        let mut b = DeckSource::shuffled(deck(), 42);
        for _ in 0..20 {
            assert_eq!(a.sample().map(|c| c.id()), b.sample().map(|c| c.id()));
        }
    }

    #[test]
    fn test_deck_exhausts_without_repeats() {
        let mut source = DeckSource::shuffled(deck(), 7);
        let mut seen = std::collections::HashSet::new();
        while let Some(card) = source.sample() {
            assert!(seen.insert(card.id()));
        }
        assert_eq!(seen.len(), 20);
        assert_eq!(source.remaining(), 0);
        assert!(source.sample().is_none());
    }

    #[test]
    fn test_ordered_deck_deals_front_first() {
        let mut source = DeckSource::ordered(deck());
        assert_eq!(source.sample().map(|c| c.key()), Some(1700));
        assert_eq!(source.sample().map(|c| c.key()), Some(1701));
    }

    #[test]
    fn test_closure_is_a_source() {
        let mut n = 0;
        let mut source = move || {
            n += 1;
            (n <= 2).then(|| Card::dated(n, "x", 1900))
        };
        assert!(source.sample().is_some());
        assert!(source.sample().is_some());
        assert!(source.sample().is_none());
    }
}
