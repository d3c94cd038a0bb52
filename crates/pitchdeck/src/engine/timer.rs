use std::time::{Duration, Instant};

/// A single-shot deadline owned by the engine.
///
/// Scheduling replaces any pending deadline, so at most one expiry is ever
/// outstanding per handle.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to expire `delay` after `from`, cancelling any earlier schedule.
    pub fn schedule(&mut self, from: Instant, delay: Duration) {
        self.deadline = Some(from + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm and return the deadline if it has been reached at `now`.
    pub fn fire_if_due(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                Some(deadline)
            }
            _ => None,
        }
    }
}
