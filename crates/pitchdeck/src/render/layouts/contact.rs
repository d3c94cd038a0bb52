use eframe::egui;

use crate::deck::{Deck, DeckSlide};
use crate::render::layouts::{self, MARGIN_X};
use crate::render::text::{self, Align};
use crate::theme::Theme;

/// Closing slide: title, short pitch and a list of contact lines.
pub fn render(
    ui: &egui::Ui,
    deck: &Deck,
    slide: &DeckSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let header_bottom =
        layouts::draw_header(ui, deck, slide.page.as_deref(), theme, rect, opacity, scale);
    let left = rect.left() + MARGIN_X * scale;
    let content_width = rect.width() - MARGIN_X * 2.0 * scale;
    let body_width = content_width * 0.42;
    let title_size = theme.title_size * scale;
    let body_size = theme.body_size * 1.1 * scale;
    let line_size = theme.body_size * scale;
    let row_height = line_size * 1.9;

    let title_h = slide
        .title
        .as_deref()
        .map_or(0.0, |t| text::measure(ui, t, title_size, content_width * 0.6));
    let body_h = slide
        .body
        .as_deref()
        .map_or(0.0, |b| text::measure(ui, b, body_size, body_width));
    let block_gap = 36.0 * scale;
    let total = title_h + block_gap + body_h + block_gap + row_height * slide.contacts.len() as f32;

    let mut y = (rect.center().y - total / 2.0).max(header_bottom);

    if let Some(title) = &slide.title {
        text::draw(ui, title, left, y, title_size, theme.text(1.0, opacity), content_width * 0.6, Align::Left);
    }
    y += title_h + block_gap;

    if let Some(body) = &slide.body {
        text::draw(ui, body, left, y, body_size, theme.text(0.9, opacity), body_width, Align::Left);
    }
    y += body_h + block_gap;

    let icon_font = egui::FontId::proportional(line_size * 1.1);
    let line_font = egui::FontId::proportional(line_size);
    for contact in &slide.contacts {
        let center_y = y + row_height / 2.0;
        let mut x = left;
        if let Some(icon) = &contact.icon {
            text::draw_line_centered_v(ui, icon, x, center_y, icon_font.clone(), theme.text(1.0, opacity));
        }
        x += line_size * 2.0;
        text::draw_line_centered_v(ui, &contact.text, x, center_y, line_font.clone(), theme.text(1.0, opacity));
        y += row_height;
    }

    if let Some(footer) = &slide.footer {
        layouts::draw_footer(ui, footer, theme, rect, Align::Right, opacity, scale);
    }
}
