//! First-class input actions.
//!
//! Every input the host can deliver is an [`Action`]. Actions can be logged,
//! serialized and replayed against a fresh engine to reproduce a session.

use crate::drag::{DragKind, DropOutcome};
use crate::error::ActionError;
use crate::game::TimelineGame;
use crate::ids::EntryId;
use crate::layout::Point;
use crate::resolution::{CloseOutcome, RevealState};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{instrument, warn};

/// One discrete input event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Pointer pressed on a card.
    BeginDrag {
        /// Which card.
        kind: DragKind,
        /// Pointer position.
        at: Point,
    },
    /// Pointer moved.
    Move {
        /// Pointer position.
        to: Point,
    },
    /// Pointer released.
    EndDrag,
    /// Pointer cancelled.
    CancelDrag,
    /// Confirm button pressed.
    ConfirmPlacement,
    /// Reveal dismissed.
    CloseReveal,
    /// A placed card was tapped.
    Inspect {
        /// Tapped entry.
        entry: EntryId,
    },
    /// Time passed.
    Advance {
        /// Elapsed milliseconds.
        ms: u64,
    },
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::BeginDrag { kind, at } => write!(f, "begin {} drag at ({}, {})", kind, at.x, at.y),
            Action::Move { to } => write!(f, "move to ({}, {})", to.x, to.y),
            Action::EndDrag => write!(f, "end drag"),
            Action::CancelDrag => write!(f, "cancel drag"),
            Action::ConfirmPlacement => write!(f, "confirm"),
            Action::CloseReveal => write!(f, "close reveal"),
            Action::Inspect { entry } => write!(f, "inspect {}", entry),
            Action::Advance { ms } => write!(f, "advance {}ms", ms),
        }
    }
}

/// Result of a successfully applied action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// A drag began.
    DragStarted,
    /// The dragged entry's index after a pointer move.
    Dragged(Option<usize>),
    /// A drag ended.
    Dropped(DropOutcome),
    /// A drag was cancelled.
    Cancelled,
    /// A reveal opened.
    Revealed(RevealState),
    /// A reveal closed.
    Closed(CloseOutcome),
    /// The clock advanced.
    Advanced,
}

impl TimelineGame {
    /// Applies one action.
    #[instrument(skip(self, action), fields(action = %action))]
    pub fn apply(&mut self, action: Action) -> Result<ActionOutcome, ActionError> {
        let result = match action {
            Action::BeginDrag { kind, at } => {
                self.begin_drag(kind, at).map(|()| ActionOutcome::DragStarted)
            }
            Action::Move { to } => self.drag_move(to).map(ActionOutcome::Dragged),
            Action::EndDrag => self.end_drag().map(ActionOutcome::Dropped),
            Action::CancelDrag => self.cancel_drag().map(|()| ActionOutcome::Cancelled),
            Action::ConfirmPlacement => self.confirm_pending().map(ActionOutcome::Revealed),
            Action::CloseReveal => self.close_reveal().map(ActionOutcome::Closed),
            Action::Inspect { entry } => self.open_inspect(entry).map(ActionOutcome::Revealed),
            Action::Advance { ms } => {
                self.advance(Duration::from_millis(ms));
                Ok(ActionOutcome::Advanced)
            }
        };
        if let Err(e) = &result {
            warn!(error = %e, "Action rejected");
        }
        result
    }

    /// Applies actions in order, stopping at the first rejection.
    #[instrument(skip(self, actions), fields(count = actions.len()))]
    pub fn replay(&mut self, actions: &[Action]) -> Result<Vec<ActionOutcome>, ActionError> {
        actions.iter().cloned().map(|a| self.apply(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_serialize_tagged() {
        let action = Action::BeginDrag {
            kind: DragKind::Center,
            at: Point::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"begin_drag","kind":"center","at":{"x":1.0,"y":2.0}}"#);
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::Advance { ms: 400 }.to_string(), "advance 400ms");
        assert_eq!(Action::Inspect { entry: EntryId(3) }.to_string(), "inspect entry#3");
    }
}
