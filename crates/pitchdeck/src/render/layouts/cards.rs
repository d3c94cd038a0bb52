use eframe::egui::{self, Pos2, Stroke};

use crate::deck::{Card, Deck, DeckSlide};
use crate::render::layouts::{self, MARGIN_X};
use crate::render::text::{self, Align};
use crate::theme::Theme;

/// Centred heading over a grid of glass cards: rows of three, remainder on the last row.
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
    let cx = rect.center().x;
    let content_width = rect.width() - MARGIN_X * 2.0 * scale;

    if let Some(kicker) = &slide.kicker {
        y += text::draw(
            ui,
            kicker,
            cx,
            y,
            theme.caption_size * 1.3 * scale,
            theme.text(0.9, opacity),
            content_width,
            Align::Center,
        );
        y += 8.0 * scale;
    }
    if let Some(title) = &slide.title {
        y += text::draw(
            ui,
            title,
            cx,
            y,
            theme.title_size * scale,
            theme.text(1.0, opacity),
            content_width,
            Align::Center,
        );
    }
    y += 32.0 * scale;

    let grid = egui::Rect::from_min_max(
        Pos2::new(rect.left() + MARGIN_X * scale, y),
        Pos2::new(rect.right() - MARGIN_X * scale, rect.bottom() - 32.0 * scale),
    );
    let gap = 24.0 * scale;
    for (card, cell) in slide
        .cards
        .iter()
        .zip(card_cells(slide.cards.len(), grid, gap))
    {
        draw_card(ui, card, theme, cell, opacity, scale);
    }
}

/// Cell rects for `count` cards. Rows hold three cards; a short last row
/// stretches its cards to fill the width.
fn card_cells(count: usize, area: egui::Rect, gap: f32) -> Vec<egui::Rect> {
    const PER_ROW: usize = 3;
    if count == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(PER_ROW);
    let row_height = (area.height() - gap * (rows as f32 - 1.0)) / rows as f32;

    let mut cells = Vec::with_capacity(count);
    for row in 0..rows {
        let in_row = (count - row * PER_ROW).min(PER_ROW);
        let cell_width = (area.width() - gap * (in_row as f32 - 1.0)) / in_row as f32;
        let top = area.top() + row as f32 * (row_height + gap);
        for col in 0..in_row {
            let left = area.left() + col as f32 * (cell_width + gap);
            cells.push(egui::Rect::from_min_size(
                Pos2::new(left, top),
                egui::vec2(cell_width, row_height),
            ));
        }
    }
    cells
}

fn draw_card(
    ui: &egui::Ui,
    card: &Card,
    theme: &Theme,
    cell: egui::Rect,
    opacity: f32,
    scale: f32,
) {
    let radius = 20.0 * scale;
    ui.painter()
        .rect_filled(cell, radius, Theme::with_opacity(theme.card_fill, opacity));
    ui.painter().rect_stroke(
        cell,
        radius,
        Stroke::new(1.0, Theme::with_opacity(theme.card_border, opacity)),
        egui::StrokeKind::Inside,
    );

    // Content hugs the bottom of the card, so lay it out bottom-up.
    let padding = 40.0 * scale;
    let width = cell.width() - padding * 2.0;
    let left = cell.left() + padding;
    let title_size = theme.card_title_size * scale;
    let desc_size = theme.body_size * scale;

    let desc_h = text::measure(ui, &card.description, desc_size, width);
    let title_h = text::measure(ui, &card.title, title_size, width);
    let desc_y = cell.bottom() - padding - desc_h;
    let title_y = desc_y - 10.0 * scale - title_h;

    text::draw(ui, &card.description, left, desc_y, desc_size, theme.text(0.8, opacity), width, Align::Left);
    text::draw(ui, &card.title, left, title_y, title_size, theme.text(1.0, opacity), width, Align::Left);

    if let Some(icon) = &card.icon {
        let icon_size = 44.0 * scale;
        let icon_y = title_y - 16.0 * scale - icon_size;
        if icon_y > cell.top() + padding * 0.5 {
            text::draw(ui, icon, left, icon_y, icon_size, theme.text(1.0, opacity), width, Align::Left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> egui::Rect {
        egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(920.0, 420.0))
    }

    #[test]
    fn test_five_cards_split_three_and_two() {
        let cells = card_cells(5, area(), 10.0);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].width(), 300.0);
        assert_eq!(cells[3].width(), 455.0);
        assert_eq!(cells[0].height(), 205.0);
        assert_eq!(cells[3].top(), 215.0);
        assert_eq!(cells[4].right(), 920.0);
    }

    #[test]
    fn test_single_card_fills_area() {
        let cells = card_cells(1, area(), 10.0);
        assert_eq!(cells, vec![area()]);
    }

    #[test]
    fn test_no_cards() {
        assert!(card_cells(0, area(), 10.0).is_empty());
    }
}
