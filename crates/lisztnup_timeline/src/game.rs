//! The timeline game engine: one owned instance per session.

use crate::card::{Player, PlayerIndex};
use crate::config::GameConfig;
use crate::drag::DragState;
use crate::error::ActionError;
use crate::events::GameEvent;
use crate::ids::{CardId, EntryId, IdAllocator};
use crate::invariants::{InvariantSet, TimelineInvariants};
use crate::layout::LayoutProvider;
use crate::resolution::RevealState;
use crate::schedule::{Scheduler, Task};
use crate::source::CardSource;
use crate::supply::CardSupply;
use crate::timeline::{PlayerTimeline, TimelineEntry};
use crate::turn::{GameStatus, TurnPhase, TurnState};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

type WinHandler = Box<dyn FnMut(PlayerIndex, &Player)>;

/// A chronological card placement game.
///
/// Owns the card supply, every player's timeline, the turn state, the drag
/// gesture, the open reveal and the task queue. View code reads through the
/// accessors and drives the game only through the operations; every
/// operation either succeeds or returns an [`ActionError`] without touching
/// state.
pub struct TimelineGame {
    pub(crate) config: GameConfig,
    pub(crate) source: Box<dyn CardSource>,
    pub(crate) layout: Box<dyn LayoutProvider>,
    pub(crate) ids: IdAllocator,
    pub(crate) supply: CardSupply,
    pub(crate) timelines: Vec<PlayerTimeline>,
    pub(crate) turn: TurnState,
    pub(crate) status: GameStatus,
    pub(crate) drag: Option<DragState>,
    pub(crate) reveal: Option<RevealState>,
    pub(crate) scheduler: Scheduler,
    pub(crate) events: Vec<GameEvent>,
    win_handler: Option<WinHandler>,
    win_signaled: bool,
}

impl std::fmt::Debug for TimelineGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineGame")
            .field("status", &self.status)
            .field("turn", &self.turn)
            .field("players", &self.timelines.len())
            .field("draw_pile", &self.supply.draw_pile().len())
            .field("center", &self.supply.center().len())
            .field("drag", &self.drag)
            .field("reveal", &self.reveal)
            .finish()
    }
}

impl TimelineGame {
    /// Creates an unstarted game.
    #[instrument(skip(source, layout))]
    pub fn new(
        config: GameConfig,
        source: impl CardSource + 'static,
        layout: impl LayoutProvider + 'static,
    ) -> Self {
        Self {
            config,
            source: Box::new(source),
            layout: Box::new(layout),
            ids: IdAllocator::new(),
            supply: CardSupply::new(),
            timelines: Vec::new(),
            turn: TurnState::new(),
            status: GameStatus::NotStarted,
            drag: None,
            reveal: None,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            win_handler: None,
            win_signaled: false,
        }
    }

    /// Registers the win signal. Invoked at most once per game.
    pub fn on_win(&mut self, handler: impl FnMut(PlayerIndex, &Player) + 'static) {
        self.win_handler = Some(Box::new(handler));
    }

    /// Starts a game: fills the draw pile and schedules the initial deal.
    ///
    /// Zero-delay deal steps run immediately; the rest run from
    /// [`TimelineGame::advance`].
    #[instrument(skip(self, players), fields(players = players.len()))]
    pub fn start(&mut self, players: Vec<Player>) -> Result<(), ActionError> {
        if self.status != GameStatus::NotStarted {
            warn!(status = ?self.status, "Start rejected");
            return Err(ActionError::AlreadyStarted);
        }
        if players.is_empty() {
            return Err(ActionError::NoPlayers);
        }

        info!("Starting timeline game");
        self.timelines = players.into_iter().map(PlayerTimeline::new).collect();
        self.turn = TurnState::new();
        self.status = GameStatus::Dealing;
        self.win_signaled = false;
        let min = *self.config.draw_pile_min();
        self.supply
            .refill_draw_pile(self.source.as_mut(), min, &HashSet::new());

        let interval = self.config.deal_interval();
        let mut delay = Duration::ZERO;
        for _ in 0..*self.config.starting_cards() {
            for player in 0..self.timelines.len() {
                let id = self.ids.task();
                self.scheduler.schedule(id, delay, Task::DealCard { player });
                delay += interval;
            }
        }
        let id = self.ids.task();
        self.scheduler.schedule(id, delay, Task::FinishDeal);

        self.run_due_tasks();
        self.check_invariants();
        Ok(())
    }

    /// Advances the virtual clock and runs every task that became due.
    #[instrument(skip(self))]
    pub fn advance(&mut self, elapsed: Duration) {
        self.scheduler.advance_clock(elapsed);
        self.run_due_tasks();
        self.check_invariants();
    }

    /// Returns the engine to its never-started state.
    ///
    /// Cancels every scheduled task and drops all cards, timelines, the drag,
    /// the reveal and queued events. Configuration, card source, layout
    /// provider and win handler are kept.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        let cancelled = self.scheduler.pending().len();
        self.scheduler.reset();
        self.supply.clear();
        self.timelines.clear();
        self.turn = TurnState::new();
        self.status = GameStatus::NotStarted;
        self.drag = None;
        self.reveal = None;
        self.events.clear();
        self.ids = IdAllocator::new();
        self.win_signaled = false;
        info!(cancelled, "Game reset");
    }

    // ─────────────────────────────────────────────────────────────
    //  Read access
    // ─────────────────────────────────────────────────────────────

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Lifecycle status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Turn state.
    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    /// Current phase.
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase()
    }

    /// Player holding the turn.
    pub fn active_player(&self) -> PlayerIndex {
        self.turn.active_player()
    }

    /// Draw pile and center stack.
    pub fn supply(&self) -> &CardSupply {
        &self.supply
    }

    /// All timelines, indexed by player.
    pub fn timelines(&self) -> &[PlayerTimeline] {
        &self.timelines
    }

    /// One player's timeline.
    pub fn timeline(&self, player: PlayerIndex) -> Option<&PlayerTimeline> {
        self.timelines.get(player)
    }

    /// The active player's timeline.
    pub fn active_timeline(&self) -> Option<&PlayerTimeline> {
        self.timelines.get(self.turn.active_player())
    }

    /// Drag gesture in flight, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Reveal on screen, if any.
    pub fn reveal(&self) -> Option<&RevealState> {
        self.reveal.as_ref()
    }

    /// Scheduler state, for hosts that sleep until the next due task.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// True when the top card may be dragged right now.
    pub fn can_play(&self) -> bool {
        crate::contracts::CanBeginCenterDrag::check(self).is_ok()
    }

    /// Takes every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Finds an entry in any timeline.
    pub fn find_entry(&self, entry: EntryId) -> Option<(PlayerIndex, &TimelineEntry)> {
        self.timelines
            .iter()
            .enumerate()
            .find_map(|(player, t)| t.get(entry).map(|e| (player, e)))
    }

    // ─────────────────────────────────────────────────────────────
    //  Internal transitions
    // ─────────────────────────────────────────────────────────────

    pub(crate) fn emit(&mut self, event: GameEvent) {
        debug!(?event, "Event");
        self.events.push(event);
    }

    /// Ids of every card placed on any timeline.
    pub(crate) fn cards_on_timelines(&self) -> HashSet<CardId> {
        self.timelines
            .iter()
            .flat_map(|t| t.entries())
            .map(|e| e.card.id())
            .collect()
    }

    pub(crate) fn active_timeline_mut(&mut self) -> Option<&mut PlayerTimeline> {
        self.timelines.get_mut(self.turn.active_player())
    }

    /// Tops the center stack up to the configured depth.
    pub(crate) fn restock(&mut self) {
        let depth = *self.config.center_depth();
        let min = *self.config.draw_pile_min();
        let in_play = self.cards_on_timelines();
        self.supply
            .refill_draw_pile(self.source.as_mut(), min, &in_play);
        self.supply.restock_center_stack(
            self.source.as_mut(),
            &mut self.ids,
            depth,
            min,
            &in_play,
        );
    }

    /// `idle → playing` once a card sits on top of the stack.
    pub(crate) fn ready_next_card(&mut self) {
        if self.turn.phase() != TurnPhase::Idle {
            return;
        }
        let Some(top) = self.supply.top().map(|e| e.id) else {
            info!("Supply exhausted");
            self.emit(GameEvent::SupplyExhausted);
            return;
        };
        if self.turn.card_ready().is_ok() {
            let player = self.turn.active_player();
            self.emit(GameEvent::CardPlayable {
                player,
                stack_entry: top,
            });
        }
    }

    /// Clears markings, rotates the turn and readies the next card.
    #[instrument(skip(self))]
    pub(crate) fn finalize_turn(&mut self) {
        if let Some(timeline) = self.active_timeline_mut() {
            timeline.clear_marks();
        }
        self.turn.rotate(self.timelines.len());
        let player = self.turn.active_player();
        info!(player, "Turn finalized");
        self.restock();
        self.emit(GameEvent::TurnStarted { player });
        self.ready_next_card();
    }

    /// Ends the game with `player` as winner and fires the win signal once.
    pub(crate) fn declare_winner(&mut self, player: PlayerIndex) {
        self.status = GameStatus::Won(player);
        self.turn.halt();
        self.drag = None;
        self.scheduler.cancel_all();
        info!(player, "Game won");
        self.emit(GameEvent::GameWon { player });
        if !self.win_signaled {
            self.win_signaled = true;
            if let (Some(handler), Some(timeline)) =
                (self.win_handler.as_mut(), self.timelines.get(player))
            {
                handler(player, timeline.player());
            }
        }
    }

    pub(crate) fn run_due_tasks(&mut self) {
        while let Some(scheduled) = self.scheduler.pop_due() {
            debug!(task = ?scheduled.task, id = %scheduled.id, "Running task");
            match scheduled.task {
                Task::DealCard { player } => self.deal_card(player),
                Task::FinishDeal => self.finish_deal(),
                Task::DiscardEntry { player, entry } => self.discard_entry(player, entry),
            }
        }
    }

    fn deal_card(&mut self, player: PlayerIndex) {
        let min = *self.config.draw_pile_min();
        let in_play = self.cards_on_timelines();
        let Some(card) = self.supply.pop_draw_pile(self.source.as_mut(), min, &in_play) else {
            debug!(player, "Nothing left to deal");
            return;
        };
        let entry = self.ids.entry();
        let card_id = card.id();
        let Some(timeline) = self.timelines.get_mut(player) else {
            return;
        };
        timeline.push(TimelineEntry::dealt(entry, card));
        self.emit(GameEvent::DealtCard {
            player,
            entry,
            card: card_id,
        });
    }

    fn finish_deal(&mut self) {
        self.status = GameStatus::InProgress;
        info!("Initial deal complete");
        self.restock();
        self.emit(GameEvent::TurnStarted {
            player: self.turn.active_player(),
        });
        self.ready_next_card();
    }

    fn discard_entry(&mut self, player: PlayerIndex, entry: EntryId) {
        if let Some(timeline) = self.timelines.get_mut(player)
            && timeline.remove(entry).is_some()
        {
            info!(player, %entry, "Wrong placement discarded");
            self.emit(GameEvent::EntryDiscarded { player, entry });
        }
        self.finalize_turn();
    }

    /// Verifies engine invariants in debug builds.
    pub(crate) fn check_invariants(&self) {
        if cfg!(debug_assertions)
            && let Err(violations) = TimelineInvariants::check_all(self)
        {
            for violation in &violations {
                warn!(invariant = %violation.description, "Invariant violated");
            }
            debug_assert!(violations.is_empty(), "Engine invariants violated: {violations:?}");
        }
    }
}
