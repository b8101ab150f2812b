//! Speculative-entry invariants: at most one unconfirmed entry, and the
//! pending entry always agrees with the turn phase.

use super::Invariant;
use crate::game::TimelineGame;
use crate::turn::TurnPhase;

/// Invariant: at most one entry in the whole game is unconfirmed.
pub struct SingleUnconfirmedEntry;

impl Invariant<TimelineGame> for SingleUnconfirmedEntry {
    fn holds(game: &TimelineGame) -> bool {
        game.timelines()
            .iter()
            .flat_map(|t| t.entries())
            .filter(|e| !e.confirmed)
            .count()
            <= 1
    }

    fn description() -> &'static str {
        "At most one timeline entry is unconfirmed"
    }
}

/// Invariant: a pending entry exists exactly when the phase is `resolving`,
/// and it lives in the active player's timeline.
///
/// Until confirmation starts the pending entry must still be unconfirmed.
pub struct PendingMatchesPhase;

impl Invariant<TimelineGame> for PendingMatchesPhase {
    fn holds(game: &TimelineGame) -> bool {
        let turn = game.turn();
        match turn.pending_entry() {
            None => turn.phase() != TurnPhase::Resolving && !turn.resolving_turn(),
            Some(pending) => {
                let Some(entry) = game.active_timeline().and_then(|t| t.get(pending)) else {
                    return false;
                };
                turn.phase() == TurnPhase::Resolving && (turn.resolving_turn() || !entry.confirmed)
            }
        }
    }

    fn description() -> &'static str {
        "Pending entry is set exactly in the resolving phase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Player};
    use crate::config::GameConfig;
    use crate::drag::DragKind;
    use crate::layout::LinearLayout;
    use crate::source::DeckSource;

    fn game() -> (TimelineGame, LinearLayout) {
        let layout = LinearLayout::rows(1, 1000.0, 100.0, 50.0);
        let deck = DeckSource::ordered((1..=20).map(|i| Card::dated(i, "w", 1800 + i as i32)).collect());
        let config = GameConfig::default().with_deal_interval_ms(0);
        let mut game = TimelineGame::new(config, deck, layout.clone());
        game.start(vec![Player::new("Ada")]).unwrap();
        (game, layout)
    }

    #[test]
    fn test_hold_through_a_placement() {
        let (mut game, layout) = game();
        assert!(SingleUnconfirmedEntry::holds(&game));
        assert!(PendingMatchesPhase::holds(&game));

        game.begin_drag(DragKind::Center, layout.outside()).unwrap();
        game.drag_move(layout.drop_point(0, 1, 1).unwrap()).unwrap();
        assert!(SingleUnconfirmedEntry::holds(&game));
        assert!(PendingMatchesPhase::holds(&game));

        game.end_drag().unwrap();
        assert!(PendingMatchesPhase::holds(&game));

        game.confirm_pending().unwrap();
        assert!(PendingMatchesPhase::holds(&game));
    }
}
