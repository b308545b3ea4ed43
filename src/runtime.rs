//! Timer primitives for deferring work off the event path
//!
//! The map is driven from a single event loop: listeners record *when* work
//! should happen and the loop's `update` tick performs it. [`Debouncer`] is
//! the `setTimeout`/`clearTimeout` pair expressed as an explicit deadline.

use instant::Instant;
use std::time::Duration;

/// Collapses a burst of triggers into one firing, `delay` after the last trigger
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
    scheduled: u64,
    fired: u64,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            scheduled: 0,
            fired: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay for future schedules; a pending deadline is kept
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Cancels any pending deadline and schedules a new one at `now + delay`
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
        self.scheduled += 1;
    }

    /// Drops the pending deadline, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consumes the pending deadline when it has passed
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.fired += 1;
                true
            }
            _ => false,
        }
    }

    /// Number of times a deadline was (re)scheduled
    pub fn scheduled_count(&self) -> u64 {
        self.scheduled
    }

    /// Number of deadlines that fired
    pub fn fired_count(&self) -> u64 {
        self.fired
    }
}
