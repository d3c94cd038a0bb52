pub mod background;
pub mod controls;
pub mod layouts;
pub mod text;
pub mod transition;

use eframe::egui;

use crate::deck::{Deck, DeckSlide, Layout};
use crate::theme::Theme;

use background::BackgroundCache;
use transition::Pose;

/// Uniform scale that fits the 1920x1080 reference canvas into `rect`.
pub fn compute_scale(rect: egui::Rect) -> f32 {
    let ref_w = 1920.0;
    let ref_h = 1080.0;
    (rect.width() / ref_w).min(rect.height() / ref_h)
}

/// Render a single slide at `pose`. The slide is scaled about the centre of
/// `rect` and clipped to it, so a zoomed slide never bleeds past the viewport.
pub fn render_slide(
    ui: &mut egui::Ui,
    deck: &Deck,
    slide: &DeckSlide,
    theme: &Theme,
    backgrounds: &BackgroundCache,
    rect: egui::Rect,
    pose: Pose,
) {
    if pose.opacity <= 0.0 {
        return;
    }
    let slide_rect = egui::Rect::from_center_size(rect.center(), rect.size() * pose.scale);
    let scale = compute_scale(slide_rect);
    let opacity = pose.opacity;

    let mut child = ui.new_child(egui::UiBuilder::new().max_rect(rect));
    child.set_clip_rect(rect.intersect(ui.clip_rect()));

    background::paint(&child, &slide.background, deck, backgrounds, slide_rect, opacity);

    match slide.layout {
        Layout::Cover => layouts::cover::render(&child, deck, slide, theme, slide_rect, opacity, scale),
        Layout::Content => {
            layouts::content::render(&child, deck, slide, theme, slide_rect, opacity, scale)
        }
        Layout::Cards => layouts::cards::render(&child, deck, slide, theme, slide_rect, opacity, scale),
        Layout::Quote => layouts::quote::render(&child, deck, slide, theme, slide_rect, opacity, scale),
        Layout::Contact => {
            layouts::contact::render(&child, deck, slide, theme, slide_rect, opacity, scale)
        }
    }
}
