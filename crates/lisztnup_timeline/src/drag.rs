//! Drag placement: turning a pointer trajectory into an insertion index.
//!
//! A `center` drag pulls the top card of the stack and keeps one speculative
//! entry in the active timeline while the pointer is over it. A `pending`
//! drag re-orders the entry already awaiting confirmation and never discards
//! it.

use crate::card::Card;
use crate::contracts::{CanBeginCenterDrag, CanRedragPending, DragActive};
use crate::error::ActionError;
use crate::events::GameEvent;
use crate::game::TimelineGame;
use crate::ids::{EntryId, StackEntryId};
use crate::layout::{Point, TimelineLayout};
use crate::timeline::{PlayerTimeline, TimelineEntry};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Which card is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DragKind {
    /// The top card of the center stack.
    Center,
    /// The placement awaiting confirmation.
    Pending,
}

/// A drag gesture in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    /// What is being dragged.
    pub kind: DragKind,
    /// The dragged card.
    pub card: Card,
    /// Stack slot the card came from (`center` drags only).
    pub stack_entry: Option<StackEntryId>,
    /// Timeline entry standing in for the card.
    pub entry: EntryId,
    /// Where the gesture began.
    pub pointer_start: Point,
    /// Latest pointer position.
    pub pointer_current: Point,
    /// True while the entry sits in the timeline.
    pub inserted: bool,
    /// Index of a re-dragged entry at gesture start.
    pub origin_index: Option<usize>,
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    /// A center card landed and awaits confirmation.
    Placed {
        /// The now-pending entry.
        entry: EntryId,
        /// Where it landed.
        index: usize,
    },
    /// A center card was released outside the timeline and stays on the stack.
    Returned,
    /// The pending entry was re-ordered.
    Moved {
        /// The pending entry.
        entry: EntryId,
        /// Where it now sits.
        index: usize,
    },
}

/// Index at which a card dropped at `pointer` would be inserted.
///
/// Returns `None` when the pointer is outside the timeline surface.
/// Otherwise walks the rendered entries in layout order and picks the first
/// whose midpoint lies strictly beyond the pointer along the primary axis;
/// that entry's current index in `timeline` is the answer. Rendered entries
/// no longer in the timeline are skipped. If no entry lies beyond the
/// pointer, the card goes at the end.
pub fn insertion_index(
    layout: &TimelineLayout,
    timeline: &PlayerTimeline,
    pointer: Point,
) -> Option<usize> {
    if !layout.surface.contains(pointer) {
        return None;
    }
    let along = layout.axis.of(pointer);
    let index = layout
        .entries
        .iter()
        .filter(|(_, rect)| rect.midpoint(layout.axis) > along)
        .find_map(|(id, _)| timeline.position(*id))
        .unwrap_or(timeline.len());
    Some(index)
}

impl TimelineGame {
    /// Starts a drag gesture at `at`.
    #[instrument(skip(self))]
    pub fn begin_drag(&mut self, kind: DragKind, at: Point) -> Result<(), ActionError> {
        match kind {
            DragKind::Center => {
                CanBeginCenterDrag::check(self)?;
                let top = self.supply.top().cloned().ok_or(ActionError::StackEmpty)?;
                self.turn.lock()?;
                let entry = self.ids.entry();
                debug!(%entry, card = %top.card.id(), "Center drag started");
                self.drag = Some(DragState {
                    kind,
                    card: top.card,
                    stack_entry: Some(top.id),
                    entry,
                    pointer_start: at,
                    pointer_current: at,
                    inserted: false,
                    origin_index: None,
                });
            }
            DragKind::Pending => {
                CanRedragPending::check(self)?;
                let pending = self.turn.pending_entry().ok_or(ActionError::NoPendingEntry)?;
                let timeline = self.active_timeline().ok_or(ActionError::UnknownEntry(pending))?;
                let index = timeline
                    .position(pending)
                    .ok_or(ActionError::UnknownEntry(pending))?;
                let card = timeline.entries()[index].card.clone();
                debug!(entry = %pending, index, "Pending drag started");
                self.drag = Some(DragState {
                    kind,
                    card,
                    stack_entry: None,
                    entry: pending,
                    pointer_start: at,
                    pointer_current: at,
                    inserted: true,
                    origin_index: Some(index),
                });
            }
        }
        self.check_invariants();
        Ok(())
    }

    /// Tracks the pointer, inserting, moving or withdrawing the dragged entry.
    ///
    /// Geometry is queried fresh on every call. Returns the entry's index in
    /// the active timeline, or `None` when it is not in the timeline.
    #[instrument(skip(self))]
    pub fn drag_move(&mut self, pointer: Point) -> Result<Option<usize>, ActionError> {
        DragActive::check(self)?;
        let player = self.turn.active_player();
        let target = self.timelines.get(player).and_then(|timeline| {
            let layout = self.layout.layout(player, timeline)?;
            insertion_index(&layout, timeline, pointer)
        });
        let Some(drag) = self.drag.as_mut() else {
            return Err(ActionError::NoActiveDrag);
        };
        let Some(timeline) = self.timelines.get_mut(player) else {
            return Ok(None);
        };

        drag.pointer_current = pointer;
        let entry = drag.entry;
        let index = match (target, drag.kind, drag.inserted) {
            (None, DragKind::Center, true) => {
                timeline.remove(entry);
                drag.inserted = false;
                debug!(%entry, "Speculative entry withdrawn");
                None
            }
            (None, _, _) => timeline.position(entry),
            (Some(index), _, false) => {
                timeline.insert(index, TimelineEntry::speculative(entry, drag.card.clone()));
                drag.inserted = true;
                Some(index)
            }
            (Some(index), _, true) => timeline.move_to(entry, index),
        };
        debug!(?target, ?index, "Pointer moved");
        self.check_invariants();
        Ok(index)
    }

    /// Releases the drag.
    ///
    /// A center card over the timeline becomes the pending placement and
    /// leaves the stack; released anywhere else it returns to the stack and
    /// the phase reverts to playing. A pending drag keeps its new position.
    #[instrument(skip(self))]
    pub fn end_drag(&mut self) -> Result<DropOutcome, ActionError> {
        DragActive::check(self)?;
        let Some(drag) = self.drag.clone() else {
            return Err(ActionError::NoActiveDrag);
        };
        let player = self.turn.active_player();
        let index = self
            .timelines
            .get(player)
            .and_then(|t| t.position(drag.entry));

        let outcome = match (drag.kind, index) {
            (DragKind::Center, Some(index)) if drag.inserted => {
                self.turn.hold_pending(drag.entry)?;
                match self.supply.draw_top() {
                    Some(top) if Some(top.id) == drag.stack_entry => {}
                    other => warn!(drawn = ?other.map(|e| e.id), expected = ?drag.stack_entry, "Stack top changed during drag"),
                }
                info!(player, entry = %drag.entry, index, "Placement pending");
                self.emit(GameEvent::PlacementPending {
                    player,
                    entry: drag.entry,
                    index,
                });
                DropOutcome::Placed {
                    entry: drag.entry,
                    index,
                }
            }
            (DragKind::Center, _) => {
                self.turn.unlock()?;
                debug!("Card returned to stack");
                DropOutcome::Returned
            }
            (DragKind::Pending, index) => DropOutcome::Moved {
                entry: drag.entry,
                index: index.unwrap_or_default(),
            },
        };
        self.drag = None;
        self.check_invariants();
        Ok(outcome)
    }

    /// Aborts the drag, restoring the state from before it began.
    #[instrument(skip(self))]
    pub fn cancel_drag(&mut self) -> Result<(), ActionError> {
        DragActive::check(self)?;
        let Some(drag) = self.drag.clone() else {
            return Err(ActionError::NoActiveDrag);
        };
        let player = self.turn.active_player();
        match drag.kind {
            DragKind::Center => {
                self.turn.unlock()?;
                if let Some(timeline) = self.timelines.get_mut(player) {
                    timeline.remove(drag.entry);
                }
            }
            DragKind::Pending => {
                if let (Some(timeline), Some(origin)) =
                    (self.timelines.get_mut(player), drag.origin_index)
                {
                    timeline.reposition(drag.entry, origin);
                }
            }
        }
        self.drag = None;
        debug!(kind = %drag.kind, "Drag cancelled");
        self.check_invariants();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Player;
    use crate::ids::EntryId;
    use crate::layout::{Axis, Rect};

    fn timeline(n: u64) -> PlayerTimeline {
        let mut t = PlayerTimeline::new(Player::new("Ada"));
        for i in 0..n {
            t.push(TimelineEntry::dealt(EntryId(i + 1), Card::dated(i + 1, "w", 1800)));
        }
        t
    }

    fn layout(t: &PlayerTimeline) -> TimelineLayout {
        TimelineLayout {
            surface: Rect::new(0.0, 0.0, 300.0, 50.0),
            axis: Axis::Horizontal,
            entries: t
                .entries()
                .iter()
                .enumerate()
                .map(|(i, e)| (e.id, Rect::new(i as f32 * 50.0, 0.0, 50.0, 50.0)))
                .collect(),
        }
    }

    #[test]
    fn test_index_before_first_midpoint() {
        let t = timeline(3);
        assert_eq!(insertion_index(&layout(&t), &t, Point::new(10.0, 25.0)), Some(0));
    }

    #[test]
    fn test_index_between_midpoints() {
        let t = timeline(3);
        assert_eq!(insertion_index(&layout(&t), &t, Point::new(60.0, 25.0)), Some(1));
        assert_eq!(insertion_index(&layout(&t), &t, Point::new(75.0, 25.0)), Some(2));
    }

    #[test]
    fn test_index_past_last_appends() {
        let t = timeline(3);
        assert_eq!(insertion_index(&layout(&t), &t, Point::new(290.0, 25.0)), Some(3));
    }

    #[test]
    fn test_outside_surface_is_none() {
        let t = timeline(3);
        assert_eq!(insertion_index(&layout(&t), &t, Point::new(10.0, 80.0)), None);
    }

    #[test]
    fn test_stale_layout_entries_skipped() {
        let t = timeline(2);
        let mut l = layout(&t);
        l.entries.insert(0, (EntryId(99), Rect::new(0.0, 0.0, 10.0, 50.0)));
        assert_eq!(insertion_index(&l, &t, Point::new(1.0, 25.0)), Some(0));
    }

    #[test]
    fn test_vertical_axis_uses_y() {
        let t = timeline(2);
        let l = TimelineLayout {
            surface: Rect::new(0.0, 0.0, 50.0, 200.0),
            axis: Axis::Vertical,
            entries: vec![
                (EntryId(1), Rect::new(0.0, 0.0, 50.0, 40.0)),
                (EntryId(2), Rect::new(0.0, 40.0, 50.0, 40.0)),
            ],
        };
        assert_eq!(insertion_index(&l, &t, Point::new(49.0, 30.0)), Some(1));
    }
}
