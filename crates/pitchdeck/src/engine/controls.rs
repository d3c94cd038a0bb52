use std::time::{Duration, Instant};

use super::timer::Timer;

/// Visibility of the on-screen controls, hidden after a stretch of inactivity.
#[derive(Debug, Clone)]
pub struct ControlsVisibility {
    visible: bool,
    hide_timer: Timer,
    idle_delay: Duration,
}

impl ControlsVisibility {
    /// Starts visible with the hide timer already running.
    pub fn new(idle_delay: Duration, now: Instant) -> Self {
        let mut controls = Self {
            visible: true,
            hide_timer: Timer::new(),
            idle_delay,
        };
        controls.hide_timer.schedule(now, idle_delay);
        controls
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn record_activity(&mut self, now: Instant) {
        if !self.visible {
            tracing::debug!("Controls shown");
        }
        self.visible = true;
        self.hide_timer.schedule(now, self.idle_delay);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.hide_timer.deadline()
    }

    /// Returns true when this call hid the controls.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.hide_timer.fire_if_due(now).is_some() {
            self.visible = false;
            tracing::debug!("Controls hidden after inactivity");
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.hide_timer.cancel();
    }
}
