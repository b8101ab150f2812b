//! Abstract geometry of the rendered timelines.
//!
//! The engine never inspects a real UI. It asks a [`LayoutProvider`] for the
//! current bounds of a timeline and its entries, on every pointer move, and
//! treats a missing answer as "pointer outside".

use crate::card::PlayerIndex;
use crate::ids::EntryId;
use crate::timeline::PlayerTimeline;
use serde::{Deserialize, Serialize};

/// A pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_new::new)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

/// Primary axis along which a timeline is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Entries run left to right.
    #[default]
    Horizontal,
    /// Entries run top to bottom.
    Vertical,
}

impl Axis {
    /// Coordinate of `point` along this axis.
    pub fn of(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, derive_new::new)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Inclusive containment test.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Center coordinate along `axis`.
    pub fn midpoint(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x + self.width / 2.0,
            Axis::Vertical => self.y + self.height / 2.0,
        }
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.midpoint(Axis::Horizontal), self.midpoint(Axis::Vertical))
    }
}

/// Snapshot of one timeline as currently rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineLayout {
    /// Drop surface of the timeline.
    pub surface: Rect,
    /// Primary axis of the surface.
    pub axis: Axis,
    /// Entry bounds in layout order.
    pub entries: Vec<(EntryId, Rect)>,
}

/// Source of live timeline geometry.
pub trait LayoutProvider {
    /// Current layout of `player`'s timeline, or `None` if it is not rendered.
    fn layout(&self, player: PlayerIndex, timeline: &PlayerTimeline) -> Option<TimelineLayout>;
}

/// Purely geometric layout: one horizontal or vertical band per player, with
/// fixed-size slots packed from the band's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearLayout {
    surfaces: Vec<Rect>,
    axis: Axis,
    slot: f32,
}

impl LinearLayout {
    /// Layout with explicit surfaces, indexed by player.
    pub fn new(surfaces: Vec<Rect>, axis: Axis, slot: f32) -> Self {
        Self {
            surfaces,
            axis,
            slot,
        }
    }

    /// Horizontal bands stacked vertically, one per player.
    pub fn rows(players: usize, width: f32, row_height: f32, slot: f32) -> Self {
        let surfaces = (0..players)
            .map(|i| Rect::new(0.0, i as f32 * row_height, width, row_height))
            .collect();
        Self::new(surfaces, Axis::Horizontal, slot)
    }

    /// Bounds of the slot at `index` on `player`'s surface.
    pub fn slot_rect(&self, player: PlayerIndex, index: usize) -> Option<Rect> {
        let surface = self.surfaces.get(player)?;
        let offset = index as f32 * self.slot;
        Some(match self.axis {
            Axis::Horizontal => Rect::new(surface.x + offset, surface.y, self.slot, surface.height),
            Axis::Vertical => Rect::new(surface.x, surface.y + offset, surface.width, self.slot),
        })
    }

    /// A pointer position that drops a card at `index` in a timeline of
    /// `len` entries.
    ///
    /// Aims just before the midpoint of the entry currently at `index`, or
    /// past the last entry when `index >= len`.
    pub fn drop_point(&self, player: PlayerIndex, index: usize, len: usize) -> Option<Point> {
        let surface = self.surfaces.get(player)?;
        let along = if index < len {
            let rect = self.slot_rect(player, index)?;
            rect.midpoint(self.axis) - self.slot / 4.0
        } else {
            let end = self.slot_rect(player, len)?;
            end.midpoint(self.axis).min(match self.axis {
                Axis::Horizontal => surface.x + surface.width,
                Axis::Vertical => surface.y + surface.height,
            })
        };
        let center = surface.center();
        Some(match self.axis {
            Axis::Horizontal => Point::new(along, center.y),
            Axis::Vertical => Point::new(center.x, along),
        })
    }

    /// A point outside every surface.
    pub fn outside(&self) -> Point {
        Point::new(-1.0, -1.0)
    }
}

impl LayoutProvider for LinearLayout {
    fn layout(&self, player: PlayerIndex, timeline: &PlayerTimeline) -> Option<TimelineLayout> {
        let surface = *self.surfaces.get(player)?;
        let entries = timeline
            .entries()
            .iter()
            .enumerate()
            .filter_map(|(i, e)| Some((e.id, self.slot_rect(player, i)?)))
            .collect();
        Some(TimelineLayout {
            surface,
            axis: self.axis,
            entries,
        })
    }
}

/// Provider for headless sessions: no timeline is ever rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLayout;

impl LayoutProvider for NoLayout {
    fn layout(&self, _player: PlayerIndex, _timeline: &PlayerTimeline) -> Option<TimelineLayout> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_inclusive() {
        let rect = Rect::new(0.0, 0.0, 10.0, 5.0);
        assert!(rect.contains(Point::new(10.0, 5.0)));
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(!rect.contains(Point::new(10.1, 2.0)));
    }

    #[test]
    fn test_rows_stack_vertically() {
        let layout = LinearLayout::rows(2, 500.0, 100.0, 50.0);
        let slot = layout.slot_rect(1, 2).unwrap();
        assert_eq!(slot, Rect::new(100.0, 100.0, 50.0, 100.0));
        assert!(layout.slot_rect(2, 0).is_none());
    }

    #[test]
    fn test_drop_point_lands_before_midpoint() {
        let layout = LinearLayout::rows(1, 500.0, 100.0, 40.0);
        let point = layout.drop_point(0, 1, 3).unwrap();
        assert_eq!(point, Point::new(50.0, 50.0));
    }
}
