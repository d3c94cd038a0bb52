//! Headless presentation engine: slide index, transition state machine,
//! idle-hiding controls, fullscreen bookkeeping and listener lifetimes.
//!
//! Every time-dependent call takes the caller's `now`, so the host drives
//! the clock (one `tick` per frame) and tests can step it exactly.

pub mod controls;
pub mod error;
pub mod fullscreen;
pub mod input;
pub mod listeners;
pub mod navigation;
pub mod slides;
pub mod timer;

use std::time::{Duration, Instant};

use controls::ControlsVisibility;
use fullscreen::FullscreenState;
use input::{Action, PlatformEvent, PlatformRequest};
use listeners::{EventKind, ListenerRegistry, Subscription};
use navigation::{Navigator, Step};

pub use error::Result;
pub use navigation::{Direction, SlideVisual, TransitionPhase};
pub use slides::SlideSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// How long the outgoing slide animates before the index moves.
    pub exit: Duration,
    /// Delay between the index moving and new navigation being accepted.
    pub settle: Duration,
    /// Inactivity before the controls hide.
    pub idle_hide: Duration,
    /// Entrance/exit easing time for a slide's opacity and scale.
    pub entrance: Duration,
    /// Fade time of the control overlay when it shows or hides.
    pub controls_fade: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            exit: Duration::from_millis(250),
            settle: Duration::from_millis(50),
            idle_hide: Duration::from_millis(3000),
            entrance: Duration::from_millis(500),
            controls_fade: Duration::from_millis(300),
        }
    }
}

/// Observable outcomes of `PresentationEngine::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    SlideChanged { from: usize, to: usize },
    TransitionSettled { index: usize },
    ControlsHidden,
}

/// Owns the navigation state for one mounted presentation.
///
/// Listener subscriptions live inside the engine, so dropping it releases
/// them along with its timers.
pub struct PresentationEngine<S> {
    slides: SlideSet<S>,
    timings: Timings,
    navigator: Navigator,
    controls: ControlsVisibility,
    fullscreen: FullscreenState,
    requests: Vec<PlatformRequest>,
    listeners: Vec<Subscription>,
}

impl<S> PresentationEngine<S> {
    pub fn new(slides: Vec<S>, timings: Timings, now: Instant) -> Result<Self> {
        Ok(Self::with_slides(SlideSet::new(slides)?, timings, now))
    }

    pub fn with_slides(slides: SlideSet<S>, timings: Timings, now: Instant) -> Self {
        let navigator = Navigator::new(slides.len(), timings.exit, timings.settle);
        let controls = ControlsVisibility::new(timings.idle_hide, now);
        tracing::debug!(slides = slides.len(), "Presentation engine mounted");
        Self {
            slides,
            timings,
            navigator,
            controls,
            fullscreen: FullscreenState::new(false),
            requests: Vec::new(),
            listeners: Vec::new(),
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────

    /// Attach the keyboard, pointer-move and fullscreen-change listeners.
    pub fn activate(&mut self, registry: &ListenerRegistry) {
        if self.is_active() {
            return;
        }
        self.listeners = EventKind::ALL
            .iter()
            .map(|&kind| registry.subscribe(kind))
            .collect();
        tracing::debug!("Presentation engine activated");
    }

    /// Detach every listener and cancel all pending timers.
    pub fn deactivate(&mut self) {
        self.listeners.clear();
        self.navigator.cancel();
        self.controls.cancel();
        tracing::debug!("Presentation engine deactivated");
    }

    pub fn is_active(&self) -> bool {
        !self.listeners.is_empty()
    }

    fn is_listening(&self, kind: EventKind) -> bool {
        self.listeners.iter().any(|s| s.kind() == kind)
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Request a transition to `target`. Out-of-range targets and requests made
    /// while another transition is running are ignored; returns whether the
    /// request was accepted.
    pub fn go_to(&mut self, target: usize, direction: Direction, now: Instant) -> bool {
        let accepted = self.navigator.request(target, direction, now);
        if accepted {
            self.controls.record_activity(now);
        }
        accepted
    }

    pub fn next(&mut self, now: Instant) -> bool {
        match self.current_index().checked_add(1) {
            Some(target) => self.go_to(target, Direction::Forward, now),
            None => false,
        }
    }

    pub fn previous(&mut self, now: Instant) -> bool {
        match self.current_index().checked_sub(1) {
            Some(target) => self.go_to(target, Direction::Backward, now),
            None => false,
        }
    }

    /// Indicator click: direction follows where `target` sits relative to the current slide.
    pub fn go_to_indicator(&mut self, target: usize, now: Instant) -> bool {
        let direction = Direction::between(self.current_index(), target);
        self.go_to(target, direction, now)
    }

    /// Place the presentation on `target` with no animation, e.g. a start slide.
    pub fn jump_to(&mut self, target: usize) -> bool {
        self.navigator.jump(target)
    }

    // ── Fullscreen ──────────────────────────────────────────────

    pub fn toggle_fullscreen(&mut self) {
        let target = self.fullscreen.request(!self.fullscreen.is_fullscreen());
        tracing::debug!(fullscreen = target, "Fullscreen toggled");
        self.requests.push(if target {
            PlatformRequest::EnterFullscreen
        } else {
            PlatformRequest::ExitFullscreen
        });
    }

    /// Ask the platform to leave fullscreen. The flag is left for the next
    /// fullscreen-change notification to correct.
    pub fn exit_fullscreen(&mut self) {
        if self.fullscreen.is_fullscreen() {
            self.requests.push(PlatformRequest::ExitFullscreen);
        }
    }

    /// Resynchronize with the platform's reported fullscreen state.
    pub fn observe_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen.observe(fullscreen) {
            tracing::debug!(fullscreen, "Fullscreen state corrected by platform");
        }
    }

    pub fn drain_requests(&mut self) -> Vec<PlatformRequest> {
        std::mem::take(&mut self.requests)
    }

    // ── Activity & events ───────────────────────────────────────

    pub fn record_activity(&mut self, now: Instant) {
        self.controls.record_activity(now);
    }

    /// Route a platform event through the bindings. Events of a kind the
    /// engine is not subscribed to are dropped; returns whether it was handled.
    pub fn handle_event(&mut self, event: PlatformEvent, now: Instant) -> bool {
        if !self.is_listening(event.kind()) {
            return false;
        }
        match event {
            PlatformEvent::KeyPressed(key) => {
                self.perform(input::binding(key), now);
                true
            }
            PlatformEvent::PointerMoved => {
                self.record_activity(now);
                true
            }
            PlatformEvent::FullscreenChanged(fullscreen) => {
                self.observe_fullscreen(fullscreen);
                true
            }
        }
    }

    pub fn perform(&mut self, action: Action, now: Instant) {
        match action {
            Action::Next => {
                self.next(now);
            }
            Action::Previous => {
                self.previous(now);
            }
            Action::ToggleFullscreen => self.toggle_fullscreen(),
            Action::ExitFullscreen => self.exit_fullscreen(),
        }
    }

    /// Fire every timer due at `now`, earliest first.
    pub fn tick(&mut self, now: Instant) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        loop {
            let nav_due = self.navigator.next_deadline().filter(|d| *d <= now);
            let hide_due = self.controls.deadline().filter(|d| *d <= now);
            match (nav_due, hide_due) {
                (Some(nav), Some(hide)) if hide < nav => self.fire_hide(now, &mut events),
                (Some(_), _) => self.fire_navigation(now, &mut events),
                (None, Some(_)) => self.fire_hide(now, &mut events),
                (None, None) => break,
            }
        }
        events
    }

    fn fire_navigation(&mut self, now: Instant, events: &mut Vec<EngineEvent>) {
        match self.navigator.poll(now) {
            Some(Step::IndexChanged { from, to }) => {
                events.push(EngineEvent::SlideChanged { from, to });
            }
            Some(Step::Settled { index }) => {
                events.push(EngineEvent::TransitionSettled { index });
            }
            None => {}
        }
    }

    fn fire_hide(&mut self, now: Instant, events: &mut Vec<EngineEvent>) {
        if self.controls.poll(now) {
            events.push(EngineEvent::ControlsHidden);
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.navigator.next_deadline(), self.controls.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Views ───────────────────────────────────────────────────

    pub fn slides(&self) -> &SlideSet<S> {
        &self.slides
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn current_index(&self) -> usize {
        self.navigator.current()
    }

    pub fn current_slide(&self) -> &S {
        &self.slides[self.current_index()]
    }

    pub fn direction(&self) -> Direction {
        self.navigator.direction()
    }

    pub fn phase(&self) -> TransitionPhase {
        self.navigator.phase()
    }

    pub fn is_transitioning(&self) -> bool {
        self.navigator.is_transitioning()
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index() > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.current_index() < self.slides.last_index()
    }

    /// The `current / total` readout, 1-indexed.
    pub fn status_text(&self) -> String {
        format!("{} / {}", self.current_index() + 1, self.slide_count())
    }

    pub fn slide_visual(&self, index: usize) -> SlideVisual {
        self.navigator.visual(index)
    }
}
