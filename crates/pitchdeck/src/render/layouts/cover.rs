use eframe::egui;

use crate::deck::{Deck, DeckSlide};
use crate::render::layouts::{self, MARGIN_X};
use crate::render::text::{self, Align};
use crate::theme::Theme;

/// Cover slide: centred title, subtitle and byline.
pub fn render(
    ui: &egui::Ui,
    deck: &Deck,
    slide: &DeckSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    layouts::draw_header(ui, deck, slide.page.as_deref(), theme, rect, opacity, scale);

    let width = rect.width() - MARGIN_X * 2.0 * scale;
    let title_size = theme.display_size * scale;
    let subtitle_size = theme.subtitle_size * scale;
    let kicker_size = theme.caption_size * 1.3 * scale;

    // Measure first so the block sits slightly above centre.
    let mut total = 0.0;
    if let Some(title) = &slide.title {
        total += text::measure(ui, title, title_size, width);
    }
    if let Some(subtitle) = &slide.subtitle {
        total += 16.0 * scale + text::measure(ui, subtitle, subtitle_size, width);
    }
    if let Some(kicker) = &slide.kicker {
        total += 22.0 * scale + text::measure(ui, kicker, kicker_size, width);
    }

    let cx = rect.center().x;
    let mut y = rect.center().y - total / 2.0 - rect.height() * 0.03;

    if let Some(title) = &slide.title {
        y += text::draw(ui, title, cx, y, title_size, theme.text(1.0, opacity), width, Align::Center);
    }
    if let Some(subtitle) = &slide.subtitle {
        y += 16.0 * scale;
        y += text::draw(
            ui,
            subtitle,
            cx,
            y,
            subtitle_size,
            theme.text(0.9, opacity),
            width,
            Align::Center,
        );
    }
    if let Some(kicker) = &slide.kicker {
        y += 22.0 * scale;
        text::draw(ui, kicker, cx, y, kicker_size, theme.text(0.75, opacity), width, Align::Center);
    }

    if let Some(footer) = &slide.footer {
        layouts::draw_footer(ui, footer, theme, rect, Align::Center, opacity, scale);
    }
}
