//! Center stack never grows past its configured depth.

use super::Invariant;
use crate::game::TimelineGame;

/// Invariant: the center stack holds at most `center_depth` cards.
pub struct CenterStackBounded;

impl Invariant<TimelineGame> for CenterStackBounded {
    fn holds(game: &TimelineGame) -> bool {
        game.supply().center().len() <= *game.config().center_depth()
    }

    fn description() -> &'static str {
        "Center stack depth never exceeds the configured target"
    }
}
