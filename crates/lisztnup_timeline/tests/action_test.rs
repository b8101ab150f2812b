//! Tests for replaying recorded action logs.

use lisztnup_timeline::{
    Action, ActionError, ActionOutcome, Card, CloseOutcome, DeckSource, DragKind, DropOutcome,
    GameConfig, LinearLayout, Player, TimelineGame,
};

fn fresh(layout: &LinearLayout) -> TimelineGame {
    let cards = [1800, 1850, 1900, 1825, 1700]
        .iter()
        .enumerate()
        .map(|(i, key)| Card::dated(i as u64 + 1, format!("Work {}", i + 1), *key))
        .collect();
    let config = GameConfig::default()
        .with_deal_interval_ms(0)
        .with_starting_cards(2)
        .with_discard_delay_ms(500);
    let mut game = TimelineGame::new(config, DeckSource::ordered(cards), layout.clone());
    game.start(vec![Player::new("Ada")]).unwrap();
    game
}

fn script(layout: &LinearLayout) -> Vec<Action> {
    vec![
        Action::BeginDrag {
            kind: DragKind::Center,
            at: layout.outside(),
        },
        Action::Move {
            to: layout.drop_point(0, 0, 2).unwrap(),
        },
        Action::EndDrag,
        Action::ConfirmPlacement,
        Action::CloseReveal,
        Action::Advance { ms: 500 },
    ]
}

#[test]
fn test_replay_matches_direct_play() {
    let layout = LinearLayout::rows(1, 2000.0, 100.0, 100.0);
    let mut game = fresh(&layout);
    let outcomes = game.replay(&script(&layout)).unwrap();

    assert_eq!(outcomes[1], ActionOutcome::Dragged(Some(0)));
    assert!(matches!(
        outcomes[2],
        ActionOutcome::Dropped(DropOutcome::Placed { index: 0, .. })
    ));
    assert!(matches!(&outcomes[3], ActionOutcome::Revealed(r) if r.is_correct == Some(false)));
    assert_eq!(outcomes[4], ActionOutcome::Closed(CloseOutcome::Discarding));
    assert_eq!(game.active_timeline().unwrap().keys(), vec![1800, 1850]);
}

#[test]
fn test_json_log_round_trips_to_same_state() {
    let layout = LinearLayout::rows(1, 2000.0, 100.0, 100.0);
    let log = serde_json::to_string(&script(&layout)).unwrap();
    let parsed: Vec<Action> = serde_json::from_str(&log).unwrap();

    let mut direct = fresh(&layout);
    direct.replay(&script(&layout)).unwrap();
    let mut replayed = fresh(&layout);
    replayed.replay(&parsed).unwrap();

    assert_eq!(direct.timelines(), replayed.timelines());
    assert_eq!(direct.supply(), replayed.supply());
    assert_eq!(direct.turn(), replayed.turn());
}

#[test]
fn test_replay_stops_at_first_rejection() {
    let layout = LinearLayout::rows(1, 2000.0, 100.0, 100.0);
    let mut game = fresh(&layout);
    let actions = vec![Action::ConfirmPlacement, Action::EndDrag];
    assert_eq!(game.replay(&actions), Err(ActionError::NoPendingEntry));
}
