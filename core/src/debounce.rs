//! Single-shot, supersedable refresh timer.
//!
//! Used to delay the repeat prediction refresh after a suggestion is
//! accepted. If a new keystroke arrives before the timer fires, the pending
//! refresh is superseded, not merged. This is plain state polled by the
//! host's event loop, not a concurrent worker; nothing here needs
//! cancellation beyond clearing the pending deadline.

use std::time::{Duration, Instant};

/// One pending refresh deadline, at most.
#[derive(Debug, Clone, Default)]
pub struct RefreshTimer {
    due: Option<Instant>,
}

impl RefreshTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer `delay` after `now`, replacing any pending deadline.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Drop any pending deadline (a newer event superseded it).
    pub fn supersede(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// True once per armed deadline when `now` has reached it.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}
