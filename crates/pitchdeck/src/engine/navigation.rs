use std::time::{Duration, Instant};

use super::timer::Timer;

/// Scale a slide grows toward while leaving forward (and rests at when it is ahead of the current one).
pub const SCALE_AHEAD: f32 = 1.05;
/// Scale a slide shrinks toward while leaving backward (and rests at when it is behind the current one).
pub const SCALE_BEHIND: f32 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    None,
}

impl Direction {
    /// Direction implied by jumping from `from` to `to`.
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    /// The outgoing slide is animating away; the index has not moved yet.
    Leaving,
    /// The index points at the new slide; waiting for the settle delay.
    Arriving,
}

/// Target pose of one slide, which the renderer eases toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideVisual {
    pub opacity: f32,
    pub scale: f32,
    /// Only the current slide receives input.
    pub interactive: bool,
    pub current: bool,
}

impl SlideVisual {
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        scale: 1.0,
        interactive: true,
        current: true,
    };
}

/// What a timer expiry did to the navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    IndexChanged { from: usize, to: usize },
    Settled { index: usize },
}

#[derive(Debug, Clone)]
pub struct Navigator {
    len: usize,
    current: usize,
    direction: Direction,
    phase: TransitionPhase,
    target: Option<usize>,
    exit_timer: Timer,
    settle_timer: Timer,
    exit: Duration,
    settle: Duration,
}

impl Navigator {
    pub fn new(len: usize, exit: Duration, settle: Duration) -> Self {
        Self {
            len,
            current: 0,
            direction: Direction::None,
            phase: TransitionPhase::Idle,
            target: None,
            exit_timer: Timer::new(),
            settle_timer: Timer::new(),
            exit,
            settle,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != TransitionPhase::Idle
    }

    /// Begin a transition. Returns false (and changes nothing) when the target
    /// is out of range or another transition is still in flight.
    pub fn request(&mut self, target: usize, direction: Direction, now: Instant) -> bool {
        if target >= self.len {
            tracing::trace!(target, len = self.len, "Navigation out of range ignored");
            return false;
        }
        if self.is_transitioning() {
            tracing::trace!(target, phase = ?self.phase, "Navigation during transition ignored");
            return false;
        }

        self.direction = direction;
        self.phase = TransitionPhase::Leaving;
        self.target = Some(target);
        self.exit_timer.schedule(now, self.exit);
        tracing::debug!(from = self.current, to = target, ?direction, "Transition started");
        true
    }

    /// Move straight to `target` without animating. Only allowed while idle.
    pub fn jump(&mut self, target: usize) -> bool {
        if target >= self.len || self.is_transitioning() {
            return false;
        }
        self.current = target;
        true
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.exit_timer.deadline(), self.settle_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire the earliest due timer, if any.
    pub fn poll(&mut self, now: Instant) -> Option<Step> {
        if let Some(fired_at) = self.exit_timer.fire_if_due(now) {
            let from = self.current;
            let to = self.target.take().unwrap_or(from);
            self.current = to;
            self.phase = TransitionPhase::Arriving;
            // Measured from the exit deadline so a late frame doesn't stretch the settle.
            self.settle_timer.schedule(fired_at, self.settle);
            return Some(Step::IndexChanged { from, to });
        }
        if self.settle_timer.fire_if_due(now).is_some() {
            self.phase = TransitionPhase::Idle;
            tracing::debug!(index = self.current, "Transition settled");
            return Some(Step::Settled {
                index: self.current,
            });
        }
        None
    }

    /// Drop any in-flight transition, leaving the index where it is.
    pub fn cancel(&mut self) {
        self.exit_timer.cancel();
        self.settle_timer.cancel();
        self.target = None;
        self.phase = TransitionPhase::Idle;
    }

    pub fn visual(&self, index: usize) -> SlideVisual {
        let current = index == self.current;
        if current && !self.is_transitioning() {
            return SlideVisual::SHOWN;
        }
        let scale = if current {
            match self.direction {
                Direction::Forward => SCALE_AHEAD,
                _ => SCALE_BEHIND,
            }
        } else if index < self.current {
            SCALE_BEHIND
        } else {
            SCALE_AHEAD
        };
        SlideVisual {
            opacity: 0.0,
            scale,
            interactive: current,
            current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn navigator(len: usize) -> Navigator {
        Navigator::new(len, ms(250), ms(50))
    }

    #[test]
    fn test_request_runs_through_phases() {
        let t0 = Instant::now();
        let mut nav = navigator(3);

        assert!(nav.request(2, Direction::Forward, t0));
        assert_eq!(nav.phase(), TransitionPhase::Leaving);
        assert_eq!(nav.current(), 0);
        assert_eq!(nav.poll(t0 + ms(249)), None);

        assert_eq!(
            nav.poll(t0 + ms(250)),
            Some(Step::IndexChanged { from: 0, to: 2 })
        );
        assert_eq!(nav.phase(), TransitionPhase::Arriving);
        assert_eq!(nav.current(), 2);

        assert_eq!(nav.poll(t0 + ms(299)), None);
        assert_eq!(nav.poll(t0 + ms(300)), Some(Step::Settled { index: 2 }));
        assert_eq!(nav.phase(), TransitionPhase::Idle);
        assert_eq!(nav.next_deadline(), None);
    }

    #[test]
    fn test_late_poll_fires_both_steps_in_order() {
        let t0 = Instant::now();
        let mut nav = navigator(3);
        nav.request(1, Direction::Forward, t0);

        let later = t0 + ms(1000);
        assert!(matches!(nav.poll(later), Some(Step::IndexChanged { .. })));
        assert!(matches!(nav.poll(later), Some(Step::Settled { .. })));
        assert_eq!(nav.poll(later), None);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let t0 = Instant::now();
        let mut nav = navigator(3);
        assert!(!nav.request(3, Direction::Forward, t0));
        assert!(!nav.request(usize::MAX, Direction::Backward, t0));
        assert_eq!(nav.phase(), TransitionPhase::Idle);
        assert_eq!(nav.current(), 0);
    }

    #[test]
    fn test_visual_targets_during_transition() {
        let t0 = Instant::now();
        let mut nav = navigator(3);
        nav.jump(1);
        assert_eq!(nav.visual(1), SlideVisual::SHOWN);
        assert_eq!(nav.visual(0).scale, SCALE_BEHIND);
        assert_eq!(nav.visual(2).scale, SCALE_AHEAD);
        assert!(!nav.visual(0).interactive);

        nav.request(2, Direction::Forward, t0);
        let leaving = nav.visual(1);
        assert_eq!(leaving.opacity, 0.0);
        assert_eq!(leaving.scale, SCALE_AHEAD);
        assert!(leaving.current);

        nav.cancel();
        nav.request(0, Direction::Backward, t0);
        assert_eq!(nav.visual(1).scale, SCALE_BEHIND);
    }

    #[test]
    fn test_jump_refused_while_transitioning() {
        let t0 = Instant::now();
        let mut nav = navigator(4);
        nav.request(1, Direction::Forward, t0);
        assert!(!nav.jump(3));
        nav.cancel();
        assert!(nav.jump(3));
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn test_direction_between() {
        assert_eq!(Direction::between(0, 3), Direction::Forward);
        assert_eq!(Direction::between(3, 1), Direction::Backward);
    }
}
