//! Seat that knows its music some of the time.

use super::{Placer, correct_index};
use lisztnup_timeline::{Card, PlayerTimeline};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Places a card correctly with probability `skill`, otherwise guesses a
/// uniformly random slot.
pub struct SimulatedPlayer {
    name: String,
    skill: f64,
    rng: StdRng,
}

impl SimulatedPlayer {
    /// Creates a seat; `skill` is clamped to `0.0..=1.0`.
    pub fn new(name: impl Into<String>, skill: f64, seed: u64) -> Self {
        Self {
            name: name.into(),
            skill: skill.clamp(0.0, 1.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Probability of a knowing placement.
    pub fn skill(&self) -> f64 {
        self.skill
    }
}

impl Placer for SimulatedPlayer {
    fn choose_index(&mut self, timeline: &PlayerTimeline, card: &Card) -> usize {
        if self.rng.random_bool(self.skill) {
            let index = correct_index(timeline, card);
            debug!(seat = %self.name, index, "Knows the year");
            index
        } else {
            let index = self.rng.random_range(0..=timeline.len());
            debug!(seat = %self.name, index, "Guessing");
            index
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lisztnup_timeline::Player;

    #[test]
    fn test_skill_is_clamped() {
        assert_eq!(SimulatedPlayer::new("a", 1.5, 0).skill(), 1.0);
        assert_eq!(SimulatedPlayer::new("a", -0.5, 0).skill(), 0.0);
    }

    #[test]
    fn test_guess_stays_in_range() {
        let mut seat = SimulatedPlayer::new("a", 0.0, 9);
        let timeline = PlayerTimeline::new(Player::new("a"));
        let card = Card::dated(1, "w", 1800);
        for _ in 0..20 {
            assert_eq!(seat.choose_index(&timeline, &card), 0);
        }
    }
}
