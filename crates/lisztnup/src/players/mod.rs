//! Placement strategies for simulated seats.

mod simulated;
mod tail;

pub use simulated::SimulatedPlayer;
pub use tail::TailPlacer;

use lisztnup_timeline::{Card, PlayerTimeline};

/// Something that decides where a drawn card goes.
pub trait Placer {
    /// Chooses an insertion index in `0..=timeline.len()` for `card`.
    fn choose_index(&mut self, timeline: &PlayerTimeline, card: &Card) -> usize;

    /// Returns the seat's display name.
    fn name(&self) -> &str;
}

/// The first index at which `card` would sit in chronological order.
///
/// Assumes `timeline` is itself chronological, which holds between turns
/// since wrong cards never stay.
pub fn correct_index(timeline: &PlayerTimeline, card: &Card) -> usize {
    timeline.keys().partition_point(|key| *key < card.key())
}
