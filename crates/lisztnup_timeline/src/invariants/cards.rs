//! No card is held by two timeline entries, nor twice by the supply.

use super::Invariant;
use crate::game::TimelineGame;
use std::collections::HashSet;

/// Invariant: every card appears at most once across all timelines, and at
/// most once across the draw pile and center stack.
pub struct DistinctTimelineCards;

impl Invariant<TimelineGame> for DistinctTimelineCards {
    fn holds(game: &TimelineGame) -> bool {
        let mut placed = HashSet::new();
        let timelines_distinct = game
            .timelines()
            .iter()
            .flat_map(|t| t.entries())
            .all(|e| placed.insert(e.card.id()));

        let supply = game.supply();
        let mut supplied = HashSet::new();
        let supply_distinct = supply
            .draw_pile()
            .iter()
            .chain(supply.center().iter().map(|e| &e.card))
            .all(|c| supplied.insert(c.id()));

        timelines_distinct && supply_distinct
    }

    fn description() -> &'static str {
        "No card is referenced twice by timelines or by the supply"
    }
}
