//! Deferred single-shot callbacks on the frame timeline.
//!
//! Callbacks are plain [`TimerEvent`] values. The control loop advances a
//! [`TimerQueue`] by the frame delta and dispatches due events one at a time,
//! so each step runs to completion before the next begins.

use crate::scene::NodeId;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerEvent {
    /// Advance the reaction sequence playing on a node.
    Reaction(NodeId),
    ClearNotice,
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerId;
    /// Returns false if the timer already fired or was never scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

#[derive(Clone, Debug)]
struct Pending {
    id: TimerId,
    due: Duration,
    event: TimerEvent,
}

/// Manual-clock timer queue. Due events come out ordered by due time, then
/// by scheduling order.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on this queue's clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn advance(&mut self, dt: Duration) {
        self.now += dt;
    }

    /// Remove and return the earliest event whose due time has passed.
    pub fn pop_due(&mut self) -> Option<(TimerId, TimerEvent)> {
        let (i, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= self.now)
            .min_by_key(|(_, p)| (p.due, p.id))?;
        let p = self.pending.swap_remove(i);
        Some((p.id, p.event))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            event,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        match self.pending.iter().position(|p| p.id == id) {
            Some(i) => {
                self.pending.swap_remove(i);
                true
            }
            None => false,
        }
    }
}
