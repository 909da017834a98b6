//! Trailing-edge debounce as a deadline tracker.
//!
//! Rather than wrapping a callback, the debouncer only remembers when the
//! trailing call is due; the owner polls it from its timer tick. Each
//! trigger pushes the deadline out, superseding any earlier pending call.

use web_time::{Duration, Instant};

/// Collapses bursts of triggers into a single trailing firing.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Debouncer that fires `window` after the last trigger.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// Record a trigger at `now`, returning the new deadline.
    pub fn trigger(&mut self, now: Instant) -> Instant {
        let deadline = now + self.window;
        self.deadline = Some(deadline);
        deadline
    }

    /// When the pending call is due, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending call if its deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
