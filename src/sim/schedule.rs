//! Wall-clock event queue
//!
//! Replaces fire-once host timers. Events carry an absolute deadline in
//! milliseconds and are drained at the top of each tick, so a pending reset
//! can never interleave with a half-finished tick.

use serde::{Deserialize, Serialize};

/// Something that happens later, outside the per-tick flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledEvent {
    /// Clear the message and install a fresh body/outline pair
    ResetRound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Entry {
    deadline_ms: f64,
    event: ScheduledEvent,
}

/// Pending events ordered by deadline (ties keep insertion order)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    entries: Vec<Entry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire at `now_ms + delay_ms`
    pub fn schedule(&mut self, now_ms: f64, delay_ms: f64, event: ScheduledEvent) {
        let deadline_ms = now_ms + delay_ms.max(0.0);
        let pos = self
            .entries
            .iter()
            .position(|e| e.deadline_ms > deadline_ms)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, Entry { deadline_ms, event });
    }

    /// Remove and return every event whose deadline is at or before `now_ms`
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<ScheduledEvent> {
        let due = self
            .entries
            .iter()
            .take_while(|e| e.deadline_ms <= now_ms)
            .count();
        self.entries.drain(..due).map(|e| e.event).collect()
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<f64> {
        self.entries.first().map(|e| e.deadline_ms)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
