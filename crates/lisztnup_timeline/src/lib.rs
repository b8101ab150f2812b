//! Lisztnup timeline engine - chronological card placement.
//!
//! Players take turns pulling the top card of a shared stack and dropping it
//! into their own timeline where they believe it belongs chronologically.
//! A placement is judged against its neighbours; correct cards stay, wrong
//! ones are discarded, and the first player to hold the target number of
//! cards wins.
//!
//! # Architecture
//!
//! - **Supply**: draw pile and center stack, refilled from a [`CardSource`]
//! - **Timelines**: one ordered list of placed cards per player
//! - **Drag**: pointer trajectory → insertion index, via a [`LayoutProvider`]
//! - **Turn**: phase machine gating which operations are legal
//! - **Resolution**: neighbour check, reveal protocol, win detection
//!
//! # Example
//!
//! ```
//! use lisztnup_timeline::{
//!     Card, DeckSource, DragKind, GameConfig, LinearLayout, Player, TimelineGame,
//! };
//!
//! let cards = (1..=30).map(|i| Card::dated(i, format!("Work {i}"), 1700 + i as i32)).collect();
//! let layout = LinearLayout::rows(2, 800.0, 100.0, 60.0);
//! let config = GameConfig::default().with_deal_interval_ms(0);
//! let mut game = TimelineGame::new(config, DeckSource::shuffled(cards, 7), layout.clone());
//! game.start(vec![Player::new("Ada"), Player::new("Grace")]).unwrap();
//!
//! game.begin_drag(DragKind::Center, layout.outside()).unwrap();
//! game.drag_move(layout.drop_point(0, 0, 1).unwrap()).unwrap();
//! game.end_drag().unwrap();
//! let reveal = game.confirm_pending().unwrap();
//! println!("{} placed {}", reveal.card, if reveal.is_correct == Some(true) { "right" } else { "wrong" });
//! game.close_reveal().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod card;
mod catalog;
mod config;
pub mod contracts;
mod drag;
mod error;
mod events;
mod game;
mod ids;
pub mod invariants;
mod layout;
mod resolution;
mod schedule;
mod source;
mod supply;
mod timeline;
mod turn;

// Crate-level exports - Domain types
pub use card::{Card, Player, PlayerIndex, YearSpan};
pub use ids::{CardId, EntryId, IdAllocator, StackEntryId, TaskId};

// Crate-level exports - Card supply
pub use catalog::{Catalog, CatalogComposer, CatalogError, CatalogFilter, CatalogPart, CatalogWork};
pub use source::{CardSource, DeckSource};
pub use supply::{CardSupply, StackEntry};

// Crate-level exports - Timelines and geometry
pub use layout::{Axis, LayoutProvider, LinearLayout, NoLayout, Point, Rect, TimelineLayout};
pub use timeline::{PlayerTimeline, TimelineEntry};

// Crate-level exports - Engine
pub use action::{Action, ActionOutcome};
pub use config::{ConfigError, GameConfig};
pub use drag::{DragKind, DragState, DropOutcome, insertion_index};
pub use error::ActionError;
pub use events::GameEvent;
pub use game::TimelineGame;
pub use resolution::{CloseOutcome, RevealPurpose, RevealState, placement_is_correct, reaches_win};
pub use schedule::{ScheduledTask, Scheduler, Task};
pub use turn::{GameStatus, TurnPhase, TurnState};
