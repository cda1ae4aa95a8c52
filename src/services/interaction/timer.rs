//! Cancellable delayed task pumped by the host's frame loop.
//!
//! Nothing runs on its own thread: the owner asks [`DelayedTask::take_due`]
//! on every tick, and a cancelled task simply stops being reported.

use std::time::{Duration, Instant};

/// Identity and deadline of one scheduled run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    id: u64,
    deadline: Instant,
}

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }
}

/// Slot holding at most one pending run.
#[derive(Debug, Default)]
pub struct DelayedTask {
    pending: Option<TimerHandle>,
    next_id: u64,
}

impl DelayedTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a run `delay` after `now`, replacing any pending run.
    pub fn schedule(&mut self, now: Instant, delay: Duration) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            deadline: now + delay,
        };
        self.pending = Some(handle);
        handle
    }

    /// Schedule only when nothing is pending. Returns true if a run was scheduled.
    pub fn schedule_if_idle(&mut self, now: Instant, delay: Duration) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.schedule(now, delay);
        true
    }

    /// Drop the pending run. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|handle| handle.deadline)
    }

    /// Clear and return the pending run if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<TimerHandle> {
        match self.pending {
            Some(handle) if handle.deadline <= now => self.pending.take(),
            _ => None,
        }
    }
}
