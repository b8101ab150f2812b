//! Cancellable scheduled tasks on a virtual clock.
//!
//! Pacing delays (dealing, the discard window) are queued here instead of
//! blocking. The host advances the clock; due tasks come back out in due-time
//! order, ties broken by scheduling order.

use crate::card::PlayerIndex;
use crate::ids::{EntryId, TaskId};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Deferred engine work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Deal one face-up card to a player.
    DealCard {
        /// Receiving player.
        player: PlayerIndex,
    },
    /// Initial deal complete; open the first turn.
    FinishDeal,
    /// Removal window over; drop the wrong entry and finalize the turn.
    DiscardEntry {
        /// Owner of the entry.
        player: PlayerIndex,
        /// Entry to drop.
        entry: EntryId,
    },
}

/// A task with its due time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    /// Task identity, usable for cancellation.
    pub id: TaskId,
    /// Clock reading at which the task becomes due.
    pub due: Duration,
    /// The work to do.
    pub task: Task,
}

/// Queue of pending tasks plus the virtual clock.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    queue: Vec<ScheduledTask>,
}

impl Scheduler {
    /// Empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Tasks not yet run or cancelled.
    pub fn pending(&self) -> &[ScheduledTask] {
        &self.queue
    }

    /// Queues `task` to run `delay` from now.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, id: TaskId, delay: Duration, task: Task) -> TaskId {
        let due = self.now + delay;
        debug!(%id, ?due, "Task scheduled");
        self.queue.push(ScheduledTask { id, due, task });
        id
    }

    /// Drops every queued task, returning how many were dropped.
    #[instrument(skip(self))]
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        if dropped > 0 {
            debug!(dropped, "Cancelled scheduled tasks");
        }
        dropped
    }

    /// Moves the clock forward.
    pub fn advance_clock(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Removes and returns the earliest due task, if any is due.
    pub fn pop_due(&mut self) -> Option<ScheduledTask> {
        let index = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= self.now)
            .min_by_key(|(_, t)| (t.due, t.id))
            .map(|(i, _)| i)?;
        Some(self.queue.remove(index))
    }

    /// Clears the queue and rewinds the clock.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.now = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_due_in_order() {
        let mut s = Scheduler::new();
        s.schedule(TaskId(2), Duration::from_millis(200), Task::FinishDeal);
        s.schedule(TaskId(1), Duration::from_millis(100), Task::DealCard { player: 0 });
        assert!(s.pop_due().is_none());

        s.advance_clock(Duration::from_millis(250));
        assert_eq!(s.pop_due().map(|t| t.id), Some(TaskId(1)));
        assert_eq!(s.pop_due().map(|t| t.id), Some(TaskId(2)));
        assert!(s.pop_due().is_none());
    }

    #[test]
    fn test_ties_break_by_id() {
        let mut s = Scheduler::new();
        s.schedule(TaskId(5), Duration::ZERO, Task::FinishDeal);
        s.schedule(TaskId(3), Duration::ZERO, Task::DealCard { player: 1 });
        assert_eq!(s.pop_due().map(|t| t.id), Some(TaskId(3)));
    }

    #[test]
    fn test_cancel_all() {
        let mut s = Scheduler::new();
        s.schedule(TaskId(1), Duration::from_millis(10), Task::FinishDeal);
        s.schedule(TaskId(2), Duration::from_millis(10), Task::FinishDeal);
        assert_eq!(s.cancel_all(), 2);
        assert_eq!(s.cancel_all(), 0);
        s.advance_clock(Duration::from_secs(1));
        assert!(s.pop_due().is_none());
    }
}
