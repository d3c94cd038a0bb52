pub mod cards;
pub mod contact;
pub mod content;
pub mod cover;
pub mod quote;

use eframe::egui::{self, Pos2, Stroke};

use crate::deck::Deck;
use crate::render::text::{self, Align};
use crate::theme::Theme;

/// Horizontal page margin in reference pixels.
pub const MARGIN_X: f32 = 100.0;
/// Vertical page margin in reference pixels.
pub const MARGIN_Y: f32 = 40.0;

/// Brand mark, deck label and optional page marker across the top. Returns
/// the y coordinate just below the header.
pub fn draw_header(
    ui: &egui::Ui,
    deck: &Deck,
    page: Option<&str>,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) -> f32 {
    let left = rect.left() + MARGIN_X * scale;
    let right = rect.right() - MARGIN_X * scale;
    let center_y = rect.top() + MARGIN_Y * scale + 20.0 * scale;
    let label_font = egui::FontId::proportional(theme.body_size * scale);
    let label_color = theme.text(0.8, opacity);

    if let Some(brand) = &deck.brand {
        draw_brand(ui, brand, left, center_y, theme, opacity, scale);
    }

    if let Some(label) = &deck.label {
        let galley = ui
            .painter()
            .layout_no_wrap(label.clone(), label_font.clone(), label_color);
        let x = if page.is_some() {
            rect.center().x - galley.rect.width() / 2.0
        } else {
            right - galley.rect.width()
        };
        text::draw_line_centered_v(ui, label, x, center_y, label_font.clone(), label_color);
    }

    if let Some(page) = page {
        let galley = ui
            .painter()
            .layout_no_wrap(page.to_string(), label_font.clone(), label_color);
        let x = right - galley.rect.width();
        text::draw_line_centered_v(ui, page, x, center_y, label_font, label_color);
    }

    center_y + 20.0 * scale + MARGIN_Y * scale
}

/// Outlined rounded square with a peak glyph, followed by the brand text.
fn draw_brand(
    ui: &egui::Ui,
    brand: &str,
    left: f32,
    center_y: f32,
    theme: &Theme,
    opacity: f32,
    scale: f32,
) {
    let color = theme.text(1.0, opacity);
    let stroke = Stroke::new(2.0 * scale, color);
    let size = 24.0 * scale;
    let mark = egui::Rect::from_min_size(
        Pos2::new(left, center_y - size / 2.0),
        egui::vec2(size, size),
    );
    ui.painter()
        .rect_stroke(mark, 6.0 * scale, stroke, egui::StrokeKind::Inside);
    let peak = vec![
        Pos2::new(mark.left() + 8.0 * scale, mark.bottom() - 8.0 * scale),
        Pos2::new(mark.center().x, mark.top() + 8.0 * scale),
        Pos2::new(mark.right() - 8.0 * scale, mark.bottom() - 8.0 * scale),
    ];
    ui.painter().add(egui::Shape::line(peak, stroke));

    text::draw_line_centered_v(
        ui,
        brand,
        mark.right() + 8.0 * scale,
        center_y,
        egui::FontId::proportional(18.0 * scale),
        color,
    );
}

/// Bottom-aligned footer text.
pub fn draw_footer(
    ui: &egui::Ui,
    footer: &str,
    theme: &Theme,
    rect: egui::Rect,
    align: Align,
    opacity: f32,
    scale: f32,
) {
    let size = theme.body_size * scale;
    let x = match align {
        Align::Left => rect.left() + MARGIN_X * scale,
        Align::Center => rect.center().x,
        Align::Right => rect.right() - MARGIN_X * scale,
    };
    let y = rect.bottom() - MARGIN_Y * scale - size * 1.3;
    text::draw(
        ui,
        footer,
        x,
        y,
        size,
        theme.text(0.6, opacity),
        rect.width(),
        align,
    );
}
