use eframe::egui;

use crate::deck::{Deck, DeckSlide};
use crate::render::layouts::{self, MARGIN_X};
use crate::render::text::{self, Align};
use crate::theme::Theme;

/// Title across the top, a body column on the left and headline figures on the right.
pub fn render(
    ui: &egui::Ui,
    deck: &Deck,
    slide: &DeckSlide,
    theme: &Theme,
    rect: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let mut y = layouts::draw_header(ui, deck, slide.page.as_deref(), theme, rect, opacity, scale);
    let left = rect.left() + MARGIN_X * scale;
    let content_width = rect.width() - MARGIN_X * 2.0 * scale;

    if let Some(title) = &slide.title {
        y += text::draw(
            ui,
            title,
            left,
            y,
            theme.title_size * scale,
            theme.text(1.0, opacity),
            content_width,
            Align::Left,
        );
        y += 60.0 * scale;
    }

    let has_stats = !slide.stats.is_empty();
    let body_width = if has_stats {
        content_width * 0.5
    } else {
        content_width * 0.7
    };

    if let Some(body) = &slide.body {
        text::draw(
            ui,
            body,
            left,
            y,
            theme.body_size * 1.1 * scale,
            theme.text(0.9, opacity),
            body_width,
            Align::Left,
        );
    }

    if has_stats {
        let stats_left = left + content_width * 0.6;
        let stats_width = content_width * 0.4;
        let mut sy = y;
        for stat in &slide.stats {
            sy += text::draw(
                ui,
                &stat.value,
                stats_left,
                sy,
                theme.title_size * scale,
                theme.text(1.0, opacity),
                stats_width,
                Align::Left,
            );
            if !stat.label.is_empty() {
                sy += 8.0 * scale;
                sy += text::draw(
                    ui,
                    &stat.label,
                    stats_left,
                    sy,
                    theme.body_size * scale,
                    theme.text(0.8, opacity),
                    stats_width,
                    Align::Left,
                );
            }
            let rule = egui::Rect::from_min_size(
                egui::pos2(stats_left, sy + 18.0 * scale),
                egui::vec2(48.0 * scale, 3.0 * scale),
            );
            ui.painter()
                .rect_filled(rule, 1.5 * scale, Theme::with_opacity(theme.accent, opacity));
            sy += 48.0 * scale;
        }
    }

    if let Some(footer) = &slide.footer {
        layouts::draw_footer(ui, footer, theme, rect, Align::Right, opacity, scale);
    }
}
