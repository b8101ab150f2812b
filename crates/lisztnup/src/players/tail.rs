//! Baseline seat that always drops at the end.

use super::Placer;
use lisztnup_timeline::{Card, PlayerTimeline};
use tracing::debug;

/// Appends every card to the end of its timeline.
pub struct TailPlacer {
    name: String,
}

impl TailPlacer {
    /// Creates a new tail placer.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Placer for TailPlacer {
    fn choose_index(&mut self, timeline: &PlayerTimeline, card: &Card) -> usize {
        debug!(seat = %self.name, card = %card.id(), "Tail placer appends");
        timeline.len()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
