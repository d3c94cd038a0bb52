use std::time::{Duration, Instant};

use crate::engine::SlideVisual;

pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// What a slide looks like on this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy)]
struct Tween {
    from: f32,
    to: f32,
    start: Instant,
}

impl Tween {
    fn settled(value: f32, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            start: now,
        }
    }

    fn value(&self, now: Instant, duration: Duration) -> f32 {
        if duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        let t = elapsed / duration.as_secs_f32();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    fn retarget(&mut self, to: f32, now: Instant, duration: Duration) {
        if to != self.to {
            self.from = self.value(now, duration);
            self.to = to;
            self.start = now;
        }
    }

    fn is_done(&self, now: Instant, duration: Duration) -> bool {
        self.from == self.to || now.saturating_duration_since(self.start) >= duration
    }
}

#[derive(Debug, Clone, Copy)]
struct Track {
    opacity: Tween,
    scale: Tween,
}

/// Eases each slide's opacity and scale toward the engine's target pose.
/// Changing a target mid-flight continues from the currently drawn value.
#[derive(Debug, Clone)]
pub struct SlideAnimator {
    duration: Duration,
    tracks: Vec<Track>,
}

impl SlideAnimator {
    /// Start every slide already resting at its initial target.
    pub fn new(targets: impl IntoIterator<Item = SlideVisual>, duration: Duration, now: Instant) -> Self {
        let tracks = targets
            .into_iter()
            .map(|target| Track {
                opacity: Tween::settled(target.opacity, now),
                scale: Tween::settled(target.scale, now),
            })
            .collect();
        Self { duration, tracks }
    }

    /// Feed the latest target for slide `index` and get its pose at `now`.
    pub fn update(&mut self, index: usize, target: SlideVisual, now: Instant) -> Pose {
        let duration = self.duration;
        let Some(track) = self.tracks.get_mut(index) else {
            return Pose {
                opacity: target.opacity,
                scale: target.scale,
            };
        };
        track.opacity.retarget(target.opacity, now, duration);
        track.scale.retarget(target.scale, now, duration);
        Pose {
            opacity: track.opacity.value(now, duration),
            scale: track.scale.value(now, duration),
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.tracks.iter().any(|track| {
            !track.opacity.is_done(now, self.duration) || !track.scale.is_done(now, self.duration)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn hidden(scale: f32) -> SlideVisual {
        SlideVisual {
            opacity: 0.0,
            scale,
            interactive: false,
            current: false,
        }
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reaches_target_after_duration() {
        let t0 = Instant::now();
        let mut animator = SlideAnimator::new([hidden(1.05)], ms(500), t0);
        assert!(!animator.is_animating(t0));

        let start = animator.update(0, SlideVisual::SHOWN, t0);
        assert_eq!(start.opacity, 0.0);
        assert!(animator.is_animating(t0 + ms(100)));

        let end = animator.update(0, SlideVisual::SHOWN, t0 + ms(500));
        assert_eq!(end, Pose { opacity: 1.0, scale: 1.0 });
        assert!(!animator.is_animating(t0 + ms(500)));
    }

    #[test]
    fn test_opacity_rises_monotonically() {
        let t0 = Instant::now();
        let mut animator = SlideAnimator::new([hidden(0.95)], ms(500), t0);
        let mut last = -1.0;
        for step in 0..=50 {
            let pose = animator.update(0, SlideVisual::SHOWN, t0 + ms(step * 10));
            assert!(pose.opacity >= last);
            last = pose.opacity;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let t0 = Instant::now();
        let mut animator = SlideAnimator::new([SlideVisual::SHOWN], ms(500), t0);
        animator.update(0, hidden(1.05), t0);
        let mid = animator.update(0, hidden(1.05), t0 + ms(250));
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);

        let after = animator.update(0, SlideVisual::SHOWN, t0 + ms(250));
        assert!((after.opacity - mid.opacity).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_index_snaps_to_target() {
        let mut animator = SlideAnimator::new([], ms(500), Instant::now());
        let pose = animator.update(3, SlideVisual::SHOWN, Instant::now());
        assert_eq!(pose, Pose { opacity: 1.0, scale: 1.0 });
    }
}
