use std::collections::VecDeque;

use chrono::{DateTime, TimeDelta, Utc};

/// Which message line a pending clear applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Error,
    Success,
}

/// Pending "blank this message line" timers.
///
/// Every shown message schedules its own clear. A later message on the same
/// line does not cancel the earlier timer, so the earlier one can blank the
/// newer text before its own delay has passed.
#[derive(Debug, Clone)]
pub struct ClearTimers {
    delay: TimeDelta,
    pending: VecDeque<(DateTime<Utc>, Channel)>,
}

impl ClearTimers {
    pub fn new(delay: TimeDelta) -> Self {
        Self {
            delay,
            pending: VecDeque::new(),
        }
    }

    pub fn schedule(&mut self, channel: Channel, now: DateTime<Utc>) {
        self.pending.push_back((now + self.delay, channel));
    }

    /// Remove and return every clear due at or before `now`, oldest first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<Channel> {
        let mut due = Vec::new();
        // Fixed delay keeps the queue sorted by due time.
        while let Some((at, channel)) = self.pending.front().copied() {
            if at > now {
                break;
            }
            self.pending.pop_front();
            due.push(channel);
        }
        due
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.pending.front().map(|(at, _)| *at)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
