use anyhow::Context;
use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::deck::{Deck, DeckSlide};
use crate::engine::input::{Key, PlatformEvent, PlatformRequest};
use crate::engine::listeners::ListenerRegistry;
use crate::engine::{EngineEvent, PresentationEngine};
use crate::render;
use crate::render::background::BackgroundCache;
use crate::render::controls::{self, ControlAction, ControlBar};
use crate::render::transition::SlideAnimator;
use crate::theme::Theme;

/// egui keys the engine has bindings for.
const BOUND_KEYS: &[(egui::Key, Key)] = &[
    (egui::Key::ArrowRight, Key::ArrowRight),
    (egui::Key::ArrowDown, Key::ArrowDown),
    (egui::Key::ArrowLeft, Key::ArrowLeft),
    (egui::Key::ArrowUp, Key::ArrowUp),
    (egui::Key::Space, Key::Space),
    (egui::Key::F, Key::F),
    (egui::Key::Escape, Key::Escape),
];

struct PresentationApp {
    deck: Deck,
    engine: PresentationEngine<DeckSlide>,
    // Owns the subscription table the engine's listener guards point into.
    registry: ListenerRegistry,
    animator: SlideAnimator,
    backgrounds: BackgroundCache,
    theme: Theme,
    show_hint: bool,
    fullscreen_watch: FullscreenWatch,
}

/// Turns the viewport's per-frame fullscreen flag into change notifications.
#[derive(Debug, Default)]
struct FullscreenWatch {
    last: Option<bool>,
}

impl FullscreenWatch {
    /// Returns an event only when `reported` differs from the last report.
    /// Frames where the platform reports nothing are skipped.
    fn observe(&mut self, reported: Option<bool>) -> Option<PlatformEvent> {
        let fullscreen = reported?;
        if self.last == Some(fullscreen) {
            return None;
        }
        self.last = Some(fullscreen);
        Some(PlatformEvent::FullscreenChanged(fullscreen))
    }
}

impl PresentationApp {
    fn new(deck: Deck, mut engine: PresentationEngine<DeckSlide>, show_hint: bool) -> Self {
        let registry = ListenerRegistry::new();
        engine.activate(&registry);
        let now = Instant::now();
        let animator = SlideAnimator::new(
            (0..engine.slide_count()).map(|i| engine.slide_visual(i)),
            engine.timings().entrance,
            now,
        );
        Self {
            deck,
            engine,
            registry,
            animator,
            backgrounds: BackgroundCache::new(),
            theme: Theme::dark(),
            show_hint,
            fullscreen_watch: FullscreenWatch::default(),
        }
    }

    /// Translate this frame's raw input into platform events. Quit is handled
    /// by the shell and never reaches the engine.
    fn collect_events(&mut self, ctx: &egui::Context) -> (Vec<PlatformEvent>, bool) {
        let mut events = Vec::new();
        let mut quit = false;
        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                quit = true;
                return;
            }
            for &(egui_key, key) in BOUND_KEYS {
                if i.key_pressed(egui_key) {
                    events.push(PlatformEvent::KeyPressed(key));
                }
            }
            if i
                .events
                .iter()
                .any(|e| matches!(e, egui::Event::PointerMoved(_)))
            {
                events.push(PlatformEvent::PointerMoved);
            }
            events.extend(self.fullscreen_watch.observe(i.viewport().fullscreen));
        });
        (events, quit)
    }

    fn dispatch(&mut self, events: Vec<PlatformEvent>, now: Instant) {
        for event in events {
            if !self.registry.is_listening(event.kind()) {
                continue;
            }
            if !self.engine.handle_event(event, now) {
                tracing::trace!(?event, phase = ?self.engine.phase(), "Event not handled");
            }
        }
    }

    fn perform_control(&mut self, action: ControlAction, now: Instant) {
        tracing::debug!(?action, "Control clicked");
        match action {
            ControlAction::Previous => {
                self.engine.previous(now);
            }
            ControlAction::Next => {
                self.engine.next(now);
            }
            ControlAction::GoTo(index) => {
                self.engine.go_to_indicator(index, now);
            }
            ControlAction::ToggleFullscreen => self.engine.toggle_fullscreen(),
        }
    }

    fn control_bar(&self) -> ControlBar {
        ControlBar {
            status: self.engine.status_text(),
            count: self.engine.slide_count(),
            current: self.engine.current_index(),
            can_previous: self.engine.can_go_previous(),
            can_next: self.engine.can_go_next(),
            fullscreen: self.engine.is_fullscreen(),
            show_hint: self.show_hint,
        }
    }

    /// Paint every visible slide, outgoing ones first so the current slide
    /// lands on top.
    fn draw_slides(&mut self, ui: &mut egui::Ui, rect: egui::Rect, now: Instant) {
        let current = self.engine.current_index();
        let order = (0..self.engine.slide_count())
            .filter(|&i| i != current)
            .chain(std::iter::once(current));
        for index in order {
            let target = self.engine.slide_visual(index);
            let pose = self.animator.update(index, target, now);
            render::render_slide(
                ui,
                &self.deck,
                &self.engine.slides()[index],
                &self.theme,
                &self.backgrounds,
                rect,
                pose,
            );
        }
    }
}

impl eframe::App for PresentationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        let (events, quit) = self.collect_events(ctx);
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        self.dispatch(events, now);

        for event in self.engine.tick(now) {
            match event {
                EngineEvent::SlideChanged { from, to } => {
                    let direction = self.engine.direction();
                    let layout = self.engine.current_slide().layout.name();
                    tracing::debug!(from, to, ?direction, layout, "Slide changed");
                }
                EngineEvent::TransitionSettled { index } => {
                    tracing::trace!(index, "Transition settled");
                }
                EngineEvent::ControlsHidden => tracing::trace!("Controls hidden"),
            }
        }

        let bg = self.theme.background;
        let mut clicked = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);

                self.draw_slides(ui, rect, now);

                let fade = ctx.animate_bool_with_time(
                    egui::Id::new("controls_fade"),
                    self.engine.controls_visible(),
                    self.engine.timings().controls_fade.as_secs_f32(),
                );
                clicked = controls::show(ui, rect, &self.control_bar(), fade);
            });

        if let Some(action) = clicked {
            self.perform_control(action, now);
        }

        // Send viewport commands outside the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        for request in self.engine.drain_requests() {
            let fullscreen = matches!(request, PlatformRequest::EnterFullscreen);
            tracing::debug!(fullscreen, "Requesting fullscreen change");
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        }

        if self.animator.is_animating(now) || self.engine.is_transitioning() || clicked.is_some() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.engine.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(Instant::now()));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.engine.deactivate();
    }
}

pub fn run(
    file: Option<PathBuf>,
    windowed: bool,
    start_slide: Option<usize>,
    config: &Config,
) -> anyhow::Result<()> {
    let deck = match &file {
        Some(path) => Deck::load(path)?,
        None => {
            tracing::debug!("No deck given, presenting the built-in sample");
            Deck::sample().context("Built-in sample deck is invalid")?
        }
    };

    let title = deck.display_title().to_string();
    let timings = config.timings();
    let mut engine = PresentationEngine::new(deck.slides.clone(), timings, Instant::now())
        .with_context(|| match &file {
            Some(path) => format!("Cannot present {}", path.display()),
            None => "Cannot present the sample deck".to_string(),
        })?;

    // --slide N is 1-indexed; out-of-range values clamp to the last slide
    if let Some(n) = start_slide {
        let index = n.saturating_sub(1).min(engine.slide_count() - 1);
        engine.jump_to(index);
    }

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let show_hint = config.show_hint();
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(PresentationApp::new(deck, engine, show_hint)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullscreen_watch_reports_changes_only() {
        let mut watch = FullscreenWatch::default();
        assert_eq!(watch.observe(None), None);
        assert_eq!(
            watch.observe(Some(true)),
            Some(PlatformEvent::FullscreenChanged(true))
        );
        assert_eq!(watch.observe(Some(true)), None);
        assert_eq!(watch.observe(None), None);
        assert_eq!(
            watch.observe(Some(false)),
            Some(PlatformEvent::FullscreenChanged(false))
        );
        assert_eq!(watch.observe(Some(false)), None);
    }

    #[test]
    fn test_first_report_is_always_delivered() {
        let mut watch = FullscreenWatch::default();
        assert_eq!(
            watch.observe(Some(false)),
            Some(PlatformEvent::FullscreenChanged(false))
        );
    }

    #[test]
    fn test_exit_releases_listeners() {
        let deck = Deck::sample().unwrap();
        let engine =
            PresentationEngine::new(deck.slides.clone(), Default::default(), Instant::now()).unwrap();
        let mut app = PresentationApp::new(deck, engine, true);
        assert!(app.engine.is_active());
        assert!(app.registry.is_listening(crate::engine::listeners::EventKind::Keyboard));

        eframe::App::on_exit(&mut app, None);
        assert!(!app.engine.is_active());
        assert_eq!(app.registry.active_count(), 0);
        assert_eq!(app.engine.next_deadline(), None);
    }
}
