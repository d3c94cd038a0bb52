use std::sync::Arc;

use eframe::egui::text::LayoutJob;
use eframe::egui::{self, Color32, FontId, Galley, Pos2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Lay out wrapped proportional text. Rows are aligned against x = 0, so
/// the galley is painted at its anchor point whatever the alignment.
pub fn layout(
    ui: &egui::Ui,
    text: &str,
    size: f32,
    color: Color32,
    max_width: f32,
    align: Align,
) -> Arc<Galley> {
    let mut job = LayoutJob::simple(text.to_string(), FontId::proportional(size), color, max_width);
    job.halign = match align {
        Align::Left => egui::Align::Min,
        Align::Center => egui::Align::Center,
        Align::Right => egui::Align::Max,
    };
    ui.painter().layout_job(job)
}

/// Paint `text` with its top edge at `y`, aligned against `x` (left edge,
/// centre, or right edge). Returns the height used.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    ui: &egui::Ui,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    color: Color32,
    max_width: f32,
    align: Align,
) -> f32 {
    let galley = layout(ui, text, size, color, max_width, align);
    let height = galley.rect.height();
    ui.painter().galley(Pos2::new(x, y), galley, color);
    height
}

/// Height `text` would take when wrapped to `max_width`.
pub fn measure(ui: &egui::Ui, text: &str, size: f32, max_width: f32) -> f32 {
    layout(ui, text, size, Color32::WHITE, max_width, Align::Left)
        .rect
        .height()
}

/// Paint a single unwrapped line vertically centred on `center_y`.
pub fn draw_line_centered_v(
    ui: &egui::Ui,
    text: &str,
    left: f32,
    center_y: f32,
    font: FontId,
    color: Color32,
) -> egui::Rect {
    let galley = ui.painter().layout_no_wrap(text.to_string(), font, color);
    let pos = Pos2::new(left, center_y - galley.rect.height() / 2.0);
    let rect = egui::Rect::from_min_size(pos, galley.rect.size());
    ui.painter().galley(pos, galley, color);
    rect
}
