//! Identifier newtypes for cards, timeline entries, stack slots and tasks.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Identity of a card as produced by a card source.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("card#{}", _0)]
pub struct CardId(pub u64);

/// Identity of a timeline entry, distinct from the card it holds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("entry#{}", _0)]
pub struct EntryId(pub u64);

/// Identity of a slot in the center stack.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("stack#{}", _0)]
pub struct StackEntryId(pub u64);

/// Identity of a scheduled task.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[display("task#{}", _0)]
pub struct TaskId(pub u64);

/// Monotonic id source owned by one engine instance.
///
/// Entry, stack and task ids share one counter so an id is never reused
/// across kinds within a session.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Creates an allocator starting at 1.
    #[instrument]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn bump(&mut self) -> u64 {
        let id = self.next.max(1);
        self.next = id + 1;
        id
    }

    /// Allocates a fresh timeline entry id.
    pub fn entry(&mut self) -> EntryId {
        EntryId(self.bump())
    }

    /// Allocates a fresh center stack slot id.
    pub fn stack_entry(&mut self) -> StackEntryId {
        StackEntryId(self.bump())
    }

    /// Allocates a fresh task id.
    pub fn task(&mut self) -> TaskId {
        TaskId(self.bump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_across_kinds() {
        let mut ids = IdAllocator::new();
        let entry = ids.entry();
        let stack = ids.stack_entry();
        let task = ids.task();
        assert_eq!(entry.0, 1);
        assert_eq!(stack.0, 2);
        assert_eq!(task.0, 3);
    }

    #[test]
    fn test_default_allocator_never_yields_zero() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.entry(), EntryId(1));
    }
}
