//! Debounced revalidation scheduling
//!
//! Validation is cheap enough to recompute wholesale, so cancellation is
//! just timer clearing: a later mutation supersedes the deadline of an
//! earlier one (trailing-edge debounce, leading edge dropped). The timer is
//! an explicit value the host polls, not a background thread, so the policy
//! stays deterministic and testable.

use std::time::{Duration, Instant};
use tracing::trace;

/// Default debounce delay between a mutation and the validation run
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Trailing-edge debounce timer
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a run `delay` from `now`, superseding any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
        trace!(delay_ms = self.delay.as_millis() as u64, "revalidation scheduled");
    }

    /// Drop any pending run.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per scheduled run, when the deadline has passed.
    /// The caller runs validation when this returns true.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
