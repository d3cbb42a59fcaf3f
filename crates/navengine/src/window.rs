//! Manual-interaction grace window.
//!
//! After a manual expand/collapse, route-driven expansion sync is
//! suppressed for a bounded duration so user intent is not immediately
//! overwritten. The window only ever suppresses a future sync — it never
//! performs an action of its own — so a stale window is harmless, but the
//! engine still cancels it on teardown as a cleanup obligation.

use std::time::{Duration, Instant};

/// Deadline-based suppression window.
///
/// Restarting replaces the deadline rather than accumulating; cancelling
/// clears it. Inactive by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractionWindow {
    deadline: Option<Instant>,
}

impl InteractionWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or re-open) the window for `grace` from now.
    pub fn restart(&mut self, grace: Duration) {
        self.deadline = Some(Instant::now() + grace);
    }

    /// Close the window immediately.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether the window is currently suppressing sync.
    pub fn is_active(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Remaining deadline, if the window was ever opened and not cancelled.
    pub fn expires_at(&self) -> Option<Instant> {
        self.deadline
    }
}
